//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating users, decks and flashcards
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

use flashcard_generator_backend::db::Database;
use flashcard_generator_backend::models::ReviewState;
use flashcard_generator_backend::{build_router, AppState};
use review_core::{Clock, FixedClock};

/// Test context containing database connection and test router.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    pub now: DateTime<Utc>,
    app: Router,
}

impl TestContext {
    /// Create a new test context with the clock pinned to the current time.
    ///
    /// The time is truncated to whole seconds so it survives a round trip
    /// through TIMESTAMPTZ unchanged.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        Self::at(Utc::now().trunc_subsecs(0)).await
    }

    /// Create a new test context with the clock pinned to `now`.
    pub async fn at(now: DateTime<Utc>) -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let mut state = AppState::new(db);
        state.clock = Arc::new(FixedClock(now)) as Arc<dyn Clock>;
        let db = state.db.clone();

        let app = build_router(state);

        Self { db, now, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a user with a live session and return its ID and token.
    pub async fn create_test_user(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO auth_sessions (token, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&token)
        .bind(user_id)
        .bind(self.now + Duration::hours(1))
        .execute(self.db.pool())
        .await
        .expect("Failed to create test session");

        (user_id, token)
    }

    /// Create an already expired session for a user and return its token.
    pub async fn create_expired_session(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO auth_sessions (token, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&token)
        .bind(user_id)
        .bind(self.now - Duration::minutes(1))
        .execute(self.db.pool())
        .await
        .expect("Failed to create expired session");

        token
    }

    /// Create a deck and return its ID.
    pub async fn create_deck(&self, user_id: Uuid, deck_name: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO decks (user_id, deck_name) VALUES ($1, $2) RETURNING id")
            .bind(user_id)
            .bind(deck_name)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to create test deck")
    }

    /// Create a flashcard with the given review state and return its ID.
    pub async fn create_flashcard(
        &self,
        user_id: Uuid,
        deck_id: i64,
        front: &str,
        state: &ReviewState,
    ) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO flashcards (user_id, deck_id, front, back, source, ease_factor,
                                    review_count, interval_days, last_reviewed_at, next_review_date)
            VALUES ($1, $2, $3, $4, 'ai-full', $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(deck_id)
        .bind(front)
        .bind(format!("Answer to {front}"))
        .bind(state.ease_factor)
        .bind(state.review_count as i32)
        .bind(state.interval_days as i32)
        .bind(state.last_reviewed_at)
        .bind(state.next_review_date)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to create test flashcard")
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM flashcard_reviews WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM flashcards WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM decks WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM auth_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
