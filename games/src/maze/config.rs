use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{MazeError, Result};

/// Tunables for a game session. Every field has a default, so a JSON file
/// only needs the keys it wants to change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Fraction of the remaining distance covered per reference frame.
    pub animation_speed: f64,
    /// Distance (in cells) under which the animation snaps to the target.
    pub snap_epsilon: f64,
    /// Frames per second of the reference frame `animation_speed` is
    /// expressed against.
    pub frame_rate: u32,
    /// Rows and columns added by each level advance.
    pub level_growth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            animation_speed: 0.15,
            snap_epsilon: 0.01,
            frame_rate: 60,
            level_growth: 1,
        }
    }
}

impl GameConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.animation_speed > 0.0 && self.animation_speed <= 1.0) {
            return Err(MazeError::InvalidConfig(format!(
                "animation_speed must be in (0, 1], got {}",
                self.animation_speed
            )));
        }
        if !(self.snap_epsilon > 0.0) {
            return Err(MazeError::InvalidConfig(format!(
                "snap_epsilon must be positive, got {}",
                self.snap_epsilon
            )));
        }
        if self.frame_rate == 0 {
            return Err(MazeError::InvalidConfig("frame_rate must be positive".to_string()));
        }
        Ok(())
    }

    pub fn frame(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}
