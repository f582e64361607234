//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const FLASHCARD_COLUMNS: &str = r#"
    id, user_id, deck_id, front, back, source, ease_factor, review_count, interval_days,
    last_reviewed_at, next_review_date, difficulty_level, created_at, updated_at
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Session Repository ===

    /// Get the session for a bearer token if it has not expired
    pub async fn get_session_by_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthSession>> {
        let session = sqlx::query_as::<_, AuthSession>(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM auth_sessions
            WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    // === Deck Repository ===

    /// Get a deck owned by the user
    pub async fn get_deck(&self, user_id: Uuid, deck_id: i64) -> Result<Option<DbDeck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, user_id, deck_name, created_at, updated_at
            FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// List the user's decks with card and due counts, most recently updated first
    pub async fn list_decks_with_counts(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<DeckInfo>> {
        let decks = sqlx::query_as::<_, DeckInfo>(
            r#"
            SELECT d.id, d.deck_name,
                   COUNT(f.id) AS flashcard_count,
                   COUNT(f.id) FILTER (
                       WHERE f.next_review_date IS NULL OR f.next_review_date <= $2
                   ) AS due_count,
                   d.created_at, d.updated_at
            FROM decks d
            LEFT JOIN flashcards f ON f.deck_id = d.id AND f.user_id = d.user_id
            WHERE d.user_id = $1
            GROUP BY d.id
            ORDER BY d.updated_at DESC, d.id
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(decks)
    }

    // === Flashcard Repository ===

    /// Get all cards of a deck, soonest due first (never scheduled cards lead)
    pub async fn get_deck_cards(&self, user_id: Uuid, deck_id: i64) -> Result<Vec<DbFlashcard>> {
        let cards = sqlx::query_as::<_, DbFlashcard>(&format!(
            r#"
            SELECT {FLASHCARD_COLUMNS}
            FROM flashcards
            WHERE user_id = $1 AND deck_id = $2
            ORDER BY next_review_date ASC NULLS FIRST, id
            "#
        ))
        .bind(user_id)
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Get a flashcard owned by the user
    pub async fn get_flashcard(&self, user_id: Uuid, card_id: i64) -> Result<Option<DbFlashcard>> {
        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            r#"
            SELECT {FLASHCARD_COLUMNS}
            FROM flashcards
            WHERE id = $1 AND user_id = $2
            "#
        ))
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    // === Review Repository ===

    /// Apply one review to a flashcard.
    ///
    /// The card row is locked for the duration of the transaction so
    /// concurrent submissions for the same card are applied one after the
    /// other. `schedule` receives the stored state and returns the next one;
    /// an error from it rolls everything back. Returns `None` when the card
    /// does not exist for this user.
    pub async fn apply_review<F>(
        &self,
        user_id: Uuid,
        card_id: i64,
        difficulty: Difficulty,
        reviewed_at: DateTime<Utc>,
        schedule: F,
    ) -> Result<Option<NextReview>>
    where
        F: FnOnce(&ReviewState) -> review_core::Result<NextReview>,
    {
        let mut tx = self.pool.begin().await?;

        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            r#"
            SELECT {FLASHCARD_COLUMNS}
            FROM flashcards
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#
        ))
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(card) = card else {
            return Ok(None);
        };

        let before = card.to_review_state();
        let next = schedule(&before)?;

        sqlx::query(
            r#"
            UPDATE flashcards
            SET ease_factor = $1,
                review_count = $2,
                interval_days = $3,
                last_reviewed_at = $4,
                next_review_date = $5,
                difficulty_level = $6,
                updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(next.ease_factor)
        .bind(clamp_to_i32(next.review_count))
        .bind(clamp_to_i32(next.interval_days))
        .bind(reviewed_at)
        .bind(next.next_review_date)
        .bind(i32::from(difficulty))
        .bind(card.id)
        .execute(&mut *tx)
        .await?;

        let review = DbReview::new(card.id, user_id, difficulty, &before, &next, reviewed_at);
        sqlx::query(
            r#"
            INSERT INTO flashcard_reviews (id, flashcard_id, user_id, reviewed_at, difficulty,
                                           interval_before, interval_after, ease_before, ease_after)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(review.id)
        .bind(review.flashcard_id)
        .bind(review.user_id)
        .bind(review.reviewed_at)
        .bind(review.difficulty)
        .bind(review.interval_before)
        .bind(review.interval_after)
        .bind(review.ease_before)
        .bind(review.ease_after)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(next))
    }

    /// Get the review log for a flashcard, oldest first
    pub async fn get_reviews(&self, user_id: Uuid, card_id: i64) -> Result<Vec<DbReview>> {
        let reviews = sqlx::query_as::<_, DbReview>(
            r#"
            SELECT id, flashcard_id, user_id, reviewed_at, difficulty,
                   interval_before, interval_after, ease_before, ease_after
            FROM flashcard_reviews
            WHERE flashcard_id = $1 AND user_id = $2
            ORDER BY reviewed_at, created_at
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
