//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::error::Result;
use crate::types::{Difficulty, NextReview, ReviewState};
use chrono::{DateTime, Utc};

pub use sm2::{calculate_next_review, Sm2};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after a review answered at `now`.
    fn schedule(
        &self,
        difficulty: Difficulty,
        state: &ReviewState,
        now: DateTime<Utc>,
    ) -> Result<NextReview>;

    /// Initial state for a new card.
    fn initial_state(&self) -> ReviewState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(Sm2::default())),
        _ => None,
    }
}
