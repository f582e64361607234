//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from review-core
pub use review_core::{Difficulty, NextReview, ReviewState, Scheduled};

// === Database Entity Types ===

/// Authenticated session issued by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Deck stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDeck {
    pub id: i64,
    pub user_id: Uuid,
    pub deck_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flashcard stored in PostgreSQL, including its review columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFlashcard {
    pub id: i64,
    pub user_id: Uuid,
    pub deck_id: i64,
    pub front: String,
    pub back: String,
    pub source: String,
    pub ease_factor: f64,
    pub review_count: i32,
    pub interval_days: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub difficulty_level: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbFlashcard {
    /// Convert the review columns to review-core state.
    ///
    /// Negative counters left by hand-edited rows read as zero; the ease
    /// factor is passed through as stored.
    pub fn to_review_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.ease_factor,
            review_count: u32::try_from(self.review_count).unwrap_or(0),
            last_reviewed_at: self.last_reviewed_at,
            next_review_date: self.next_review_date,
            interval_days: u32::try_from(self.interval_days).unwrap_or(0),
        }
    }

    /// Convert to the card shape served to a learning session
    pub fn to_learn_card(&self, deck_name: &str) -> LearnCard {
        LearnCard {
            id: self.id,
            front: self.front.clone(),
            back: self.back.clone(),
            deck_name: deck_name.to_string(),
            last_reviewed_at: self.last_reviewed_at,
            next_review_date: self.next_review_date,
            review_count: u32::try_from(self.review_count).unwrap_or(0),
            difficulty_level: self.difficulty_level,
        }
    }
}

impl Scheduled for DbFlashcard {
    fn next_review_date(&self) -> Option<DateTime<Utc>> {
        self.next_review_date
    }
}

/// Review log record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub flashcard_id: i64,
    pub user_id: Uuid,
    pub reviewed_at: DateTime<Utc>,
    pub difficulty: i32,
    pub interval_before: i32,
    pub interval_after: i32,
    pub ease_before: f64,
    pub ease_after: f64,
}

impl DbReview {
    /// Build the log entry for one applied review
    pub fn new(
        flashcard_id: i64,
        user_id: Uuid,
        difficulty: Difficulty,
        before: &ReviewState,
        after: &NextReview,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            flashcard_id,
            user_id,
            reviewed_at,
            difficulty: difficulty.into(),
            interval_before: clamp_to_i32(before.interval_days),
            interval_after: clamp_to_i32(after.interval_days),
            ease_before: before.ease_factor,
            ease_after: after.ease_factor,
        }
    }
}

/// Deck info with counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeckInfo {
    pub id: i64,
    pub deck_name: String,
    pub flashcard_count: i64,
    pub due_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Saturating conversion for INTEGER columns
pub fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// === API Request/Response Types ===

// Learn types
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnQuery {
    pub deck_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnCard {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub deck_name: String,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub review_count: u32,
    pub difficulty_level: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnSessionResponse {
    pub deck_id: i64,
    pub due_count: usize,
    pub total_count: usize,
    /// True when nothing was due and the session was filled with the
    /// least recently reviewed cards instead.
    pub fallback: bool,
    pub cards: Vec<LearnCard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub flashcard_id: i64,
    pub difficulty: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub flashcard_id: i64,
    pub next_review_date: DateTime<Utc>,
    pub ease_factor: f64,
    pub review_count: u32,
    pub interval: u32,
    pub difficulty_label: String,
}

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckInfo>,
    pub total: usize,
}
