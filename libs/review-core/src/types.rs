//! Core types for flashcard review scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ReviewError};

/// Ease factor assigned to a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lower bound for the ease factor after any update.
pub const MINIMUM_EASE_FACTOR: f64 = 1.3;

/// User-rated difficulty of a review, 1 (very easy) to 5 (very hard).
///
/// This runs opposite to the SM-2 quality scale; use [`Difficulty::quality`]
/// to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Validate a raw difficulty value.
    pub fn new(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }

    /// Raw 1-5 value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// SM-2 quality (5 = perfect recall, 1 = blackout).
    pub fn quality(self) -> u8 {
        6 - self.0
    }

    /// Whether this answer restarts the learning curve.
    pub fn is_lapse(self) -> bool {
        self.quality() < 3
    }

    /// Human-readable label for the difficulty.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very easy",
            2 => "Easy",
            3 => "Medium",
            4 => "Hard",
            _ => "Very hard",
        }
    }
}

impl TryFrom<i32> for Difficulty {
    type Error = ReviewError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = ReviewError;

    fn try_from(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ReviewError::InvalidDifficulty(value))
        }
    }
}

impl From<Difficulty> for i32 {
    fn from(difficulty: Difficulty) -> Self {
        i32::from(difficulty.0)
    }
}

/// Review state stored on each flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub review_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    pub interval_days: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            review_count: 0,
            last_reviewed_at: None,
            next_review_date: None,
            interval_days: 0,
        }
    }
}

/// Outcome of scheduling one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextReview {
    pub next_review_date: DateTime<Utc>,
    /// Rounded to two decimal places.
    pub ease_factor: f64,
    pub review_count: u32,
    pub interval_days: u32,
}

impl NextReview {
    /// State to persist after a review recorded at `reviewed_at`.
    pub fn apply_to(&self, reviewed_at: DateTime<Utc>) -> ReviewState {
        ReviewState {
            ease_factor: self.ease_factor,
            review_count: self.review_count,
            last_reviewed_at: Some(reviewed_at),
            next_review_date: Some(self.next_review_date),
            interval_days: self.interval_days,
        }
    }
}
