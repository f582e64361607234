//! Learning session assembly.
//!
//! The review core decides which cards are due and how many to show. This
//! module adds the application policy on top: slice the due list to the
//! recommended size, and when nothing is due, keep the user studying with
//! never-reviewed cards followed by the longest-unreviewed ones.

use chrono::{DateTime, Utc};
use review_core::{is_due, recommended_session_size, select_due_cards, Scheduled};

/// A session's cards plus the counts it was assembled from.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningSession<T> {
    pub cards: Vec<T>,
    pub due_count: usize,
    pub total_count: usize,
    pub fallback: bool,
}

/// Cards that expose when they were last reviewed.
pub trait Reviewed: Scheduled {
    fn last_reviewed_at(&self) -> Option<DateTime<Utc>>;
}

impl Reviewed for crate::models::DbFlashcard {
    fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed_at
    }
}

/// Build a session from all candidate cards of a deck.
///
/// Due cards keep the order they were given in.
pub fn assemble_session<T: Reviewed>(mut cards: Vec<T>, now: DateTime<Utc>) -> LearningSession<T> {
    let total_count = cards.len();
    let due_count = cards
        .iter()
        .filter(|card| is_due(card.next_review_date(), now))
        .count();

    if due_count > 0 {
        let mut due = select_due_cards(cards, now);
        due.truncate(recommended_session_size(due_count));
        return LearningSession {
            cards: due,
            due_count,
            total_count,
            fallback: false,
        };
    }

    // None sorts before Some, so never-reviewed cards lead
    cards.sort_by_key(|card| card.last_reviewed_at());
    cards.truncate(recommended_session_size(total_count));

    LearningSession {
        cards,
        due_count: 0,
        total_count,
        fallback: total_count > 0,
    }
}
