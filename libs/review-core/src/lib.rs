//! Review scheduling core for the flashcard generator.
//!
//! Provides:
//! - SM-2 spaced repetition scheduling driven by a 1-5 difficulty rating
//! - Due card selection and learning session sizing
//! - A clock abstraction so callers can pin "now"
//! - Shared types (ReviewState, Difficulty, NextReview)
//!
//! Everything here is pure: no I/O, no shared state.

pub mod algorithm;
pub mod clock;
pub mod error;
pub mod selection;
pub mod types;

pub use algorithm::{calculate_next_review, get_algorithm, Sm2, SpacedRepetitionAlgorithm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, ReviewError};
pub use selection::{
    is_due, recommended_session_size, select_due_cards, Scheduled, MAX_SESSION_SIZE,
};
pub use types::{
    Difficulty, NextReview, ReviewState, INITIAL_EASE_FACTOR, MINIMUM_EASE_FACTOR,
};
