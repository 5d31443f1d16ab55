use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::problems::ProblemCategory;

/// Per-session counters, shaped like the game-session record a progress
/// tracker stores: problems attempted and solved, wrong answers per category,
/// time spent and whether the goal was reached.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub level: u32,
    pub moves: u32,
    pub invalid_moves: u32,
    pub problems_total: u32,
    pub problems_solved: u32,
    pub wrong_addition: u32,
    pub wrong_subtraction: u32,
    pub wrong_place: u32,
    pub time_spent_seconds: f64,
    pub completed: bool,
}

impl SessionStats {
    pub fn new(level: u32, problems_total: usize) -> Self {
        Self {
            level,
            problems_total: problems_total as u32,
            ..Self::default()
        }
    }

    pub fn record_wrong_answer(&mut self, category: ProblemCategory) {
        match category {
            ProblemCategory::Addition => self.wrong_addition += 1,
            ProblemCategory::Subtraction => self.wrong_subtraction += 1,
            ProblemCategory::PlaceValue => self.wrong_place += 1,
        }
    }

    pub fn add_time(&mut self, elapsed: Duration) {
        self.time_spent_seconds += elapsed.as_secs_f64();
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_addition + self.wrong_subtraction + self.wrong_place
    }

    /// Percentage of problem cells solved, 0 when the maze has none.
    pub fn success_rate(&self) -> f64 {
        if self.problems_total == 0 {
            0.0
        } else {
            self.problems_solved as f64 / self.problems_total as f64 * 100.0
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
