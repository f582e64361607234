//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use flashcard_generator_backend::models::ReviewState;

/// Review state of a card that has never been reviewed.
pub fn new_card_state() -> ReviewState {
    ReviewState::default()
}

/// Review state of a card last reviewed `reviewed_days_ago` and due in `due_in_days`.
pub fn scheduled_state(
    now: DateTime<Utc>,
    review_count: u32,
    reviewed_days_ago: i64,
    due_in_days: i64,
) -> ReviewState {
    ReviewState {
        ease_factor: 2.5,
        review_count,
        last_reviewed_at: Some(now - Duration::days(reviewed_days_ago)),
        next_review_date: Some(now + Duration::days(due_in_days)),
        interval_days: (reviewed_days_ago + due_in_days).max(1) as u32,
    }
}

/// Create a submit review request body.
pub fn submit_review_request(flashcard_id: i64, difficulty: i32) -> serde_json::Value {
    json!({
        "flashcard_id": flashcard_id,
        "difficulty": difficulty,
    })
}

/// Generate a unique test deck name to avoid collisions.
pub fn unique_deck_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
