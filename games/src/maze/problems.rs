use std::fmt;

use env::rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{MazeError, Result};

/// Default operand range for addition and subtraction.
pub const BASIC_RANGE: (u32, u32) = (0, 100);
/// Default range of the number a place-value question is asked about.
pub const PLACE_VALUE_RANGE: (u32, u32) = (10, 999);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemCategory {
    Addition,
    Subtraction,
    PlaceValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Number(u64),
    Text(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(value) => write!(f, "{}", value),
            Answer::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathProblem {
    pub question: String,
    pub answer: Answer,
    pub category: ProblemCategory,
}

impl MathProblem {
    /// Answers are compared as text after trimming the input.
    pub fn is_correct(&self, input: &str) -> bool {
        input.trim() == self.answer.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Place {
    Ones,
    Tens,
    Hundreds,
    Thousands,
}

impl Place {
    pub const ALL: [Place; 4] = [Place::Ones, Place::Tens, Place::Hundreds, Place::Thousands];

    pub fn name(&self) -> &'static str {
        match self {
            Place::Ones => "ones",
            Place::Tens => "tens",
            Place::Hundreds => "hundreds",
            Place::Thousands => "thousands",
        }
    }

    fn exponent(&self) -> u32 {
        match self {
            Place::Ones => 0,
            Place::Tens => 1,
            Place::Hundreds => 2,
            Place::Thousands => 3,
        }
    }

    pub fn digit_of(&self, number: u32) -> u32 {
        number / 10u32.pow(self.exponent()) % 10
    }
}

fn check_range(min: u32, max: u32) -> Result<()> {
    if min > max {
        return Err(MazeError::InvalidRange { min, max });
    }
    Ok(())
}

pub fn addition<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Result<MathProblem> {
    check_range(min, max)?;
    Ok(build_addition(rng, min, max))
}

/// Operands are ordered so the difference is never negative.
pub fn subtraction<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Result<MathProblem> {
    check_range(min, max)?;
    Ok(build_subtraction(rng, min, max))
}

pub fn random_basic<R: Rng + ?Sized>(rng: &mut R) -> MathProblem {
    let (min, max) = BASIC_RANGE;
    if rng.random_bool(0.5) {
        build_addition(rng, min, max)
    } else {
        build_subtraction(rng, min, max)
    }
}

pub fn place_value<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Result<MathProblem> {
    check_range(min, max)?;
    Ok(build_place_value(rng, min, max))
}

/// Either a basic arithmetic or a place-value problem, with equal odds.
pub fn random_problem<R: Rng + ?Sized>(rng: &mut R) -> MathProblem {
    if rng.random_bool(0.5) {
        random_basic(rng)
    } else {
        let (min, max) = PLACE_VALUE_RANGE;
        build_place_value(rng, min, max)
    }
}

fn build_addition<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> MathProblem {
    let a = rng.random_range(min..=max);
    let b = rng.random_range(min..=max);
    MathProblem {
        question: format!("{} + {} = ?", a, b),
        answer: Answer::Number(a as u64 + b as u64),
        category: ProblemCategory::Addition,
    }
}

fn build_subtraction<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> MathProblem {
    let mut a = rng.random_range(min..=max);
    let mut b = rng.random_range(min..=max);
    if a < b {
        std::mem::swap(&mut a, &mut b);
    }
    MathProblem {
        question: format!("{} - {} = ?", a, b),
        answer: Answer::Number((a - b) as u64),
        category: ProblemCategory::Subtraction,
    }
}

fn build_place_value<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> MathProblem {
    let number = rng.random_range(min..=max);
    let digits = number.to_string();
    // only places the number actually has
    let highest = (digits.len() - 1).min(Place::ALL.len() - 1);
    let place = Place::ALL[rng.random_range(0..=highest)];

    if rng.random_bool(0.5) {
        MathProblem {
            question: format!(
                "What is the digit in the {} place of {}?",
                place.name(),
                number
            ),
            answer: Answer::Text(place.digit_of(number).to_string()),
            category: ProblemCategory::PlaceValue,
        }
    } else {
        let digit_index = digits.len() - place.exponent() as usize - 1;
        MathProblem {
            question: format!(
                "What number place is this?\n{}\n{}^",
                digits,
                " ".repeat(digit_index)
            ),
            answer: Answer::Text(place.name().to_string()),
            category: ProblemCategory::PlaceValue,
        }
    }
}
