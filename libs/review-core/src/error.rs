//! Error types for review-core.

use thiserror::Error;

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Errors that can occur while scheduling a review.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(i64),

    #[error("next review date is out of range for an interval of {interval_days} days")]
    DateOutOfRange { interval_days: u32 },
}
