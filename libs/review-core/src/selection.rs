//! Due card selection and session sizing.

use chrono::{DateTime, Utc};

use crate::types::ReviewState;

/// Upper bound on the number of cards in one learning session.
pub const MAX_SESSION_SIZE: usize = 25;

/// Anything carrying a next review date.
pub trait Scheduled {
    fn next_review_date(&self) -> Option<DateTime<Utc>>;
}

impl Scheduled for ReviewState {
    fn next_review_date(&self) -> Option<DateTime<Utc>> {
        self.next_review_date
    }
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn next_review_date(&self) -> Option<DateTime<Utc>> {
        (**self).next_review_date()
    }
}

/// A card is due when it was never scheduled or its date has been reached.
pub fn is_due(next_review_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match next_review_date {
        None => true,
        Some(date) => now >= date,
    }
}

/// Keep the due cards, preserving input order.
pub fn select_due_cards<I>(cards: I, now: DateTime<Utc>) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Scheduled,
{
    cards
        .into_iter()
        .filter(|card| is_due(card.next_review_date(), now))
        .collect()
}

/// Number of cards to present when `total_due` cards are waiting.
///
/// Small backlogs are taken whole; larger ones are stepped down to bound the
/// session length.
pub fn recommended_session_size(total_due: usize) -> usize {
    match total_due {
        0..=10 => total_due,
        11..=20 => 15,
        21..=50 => 20,
        _ => MAX_SESSION_SIZE,
    }
}
