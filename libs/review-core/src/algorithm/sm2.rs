//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2, driven by a 1-5 difficulty rating that is the
//! inverse of the SM-2 quality grade (`quality = 6 - difficulty`).
//!
//! Interval history is not stored. From the third review on, the previous
//! interval is rebuilt by replaying `6 -> round(i * ef)` with the ease factor
//! of the current review, so a change in ease retroactively reshapes the
//! whole trajectory. This approximates true SM-2 and is kept as is: changing
//! it would move the due dates of every card already scheduled.
//!
//! Intervals grow geometrically with consecutive easy answers. Fourteen in a
//! row already push the next date some 200,000 years out, and the fifteenth
//! lands past the last date chrono can represent. Scheduling then fails with
//! [`ReviewError::DateOutOfRange`] instead of producing a date.

use super::SpacedRepetitionAlgorithm;
use crate::error::{Result, ReviewError};
use crate::types::{Difficulty, NextReview, ReviewState, INITIAL_EASE_FACTOR, MINIMUM_EASE_FACTOR};
use chrono::{DateTime, Days, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first review and after any lapse.
    pub first_interval: u32,
    pub second_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE_FACTOR,
            minimum_ease: MINIMUM_EASE_FACTOR,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

/// Schedule a review with the default SM-2 parameters.
///
/// `difficulty` is validated before anything else; out-of-range values are
/// rejected, never clamped.
pub fn calculate_next_review(
    difficulty: i32,
    state: &ReviewState,
    now: DateTime<Utc>,
) -> Result<NextReview> {
    let difficulty = Difficulty::new(difficulty)?;
    Sm2::default().schedule(difficulty, state, now)
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.initial_ease,
            ..ReviewState::default()
        }
    }

    fn schedule(
        &self,
        difficulty: Difficulty,
        state: &ReviewState,
        now: DateTime<Utc>,
    ) -> Result<NextReview> {
        let review_count = state.review_count.saturating_add(1);
        let ease_factor = self.next_ease(state.ease_factor, difficulty.quality());

        let interval_days = if difficulty.is_lapse() {
            self.first_interval
        } else {
            match review_count {
                1 => self.first_interval,
                2 => self.second_interval,
                n => {
                    let previous = self.replayed_interval(n - 1, ease_factor);
                    to_days((previous * ease_factor).round())
                }
            }
        };

        let next_review_date = now
            .checked_add_days(Days::new(u64::from(interval_days)))
            .ok_or(ReviewError::DateOutOfRange { interval_days })?;

        Ok(NextReview {
            next_review_date,
            ease_factor: round_to_hundredths(ease_factor),
            review_count,
            interval_days,
        })
    }
}

impl Sm2 {
    fn next_ease(&self, ease_factor: f64, quality: u8) -> f64 {
        let miss = f64::from(5 - quality);
        let next = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
        if next < self.minimum_ease {
            self.minimum_ease
        } else {
            next
        }
    }

    /// Interval the card would have had at `review_count`, replayed with
    /// `ease_factor`.
    fn replayed_interval(&self, review_count: u32, ease_factor: f64) -> f64 {
        match review_count {
            0 | 1 => f64::from(self.first_interval),
            2 => f64::from(self.second_interval),
            n => (3..=n).fold(f64::from(self.second_interval), |interval, _| {
                (interval * ease_factor).round()
            }),
        }
    }
}

fn to_days(interval: f64) -> u32 {
    // saturating float-to-int cast
    interval as u32
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
