//! Learning session endpoints

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::learn::assemble_session;
use crate::AppState;

/// GET /api/learn?deck_id=
pub async fn session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<LearnQuery>,
) -> Result<Json<LearnSessionResponse>> {
    let deck_id = query
        .deck_id
        .ok_or_else(|| ApiError::BadRequest("Missing deck_id parameter".to_string()))?;

    let deck = state
        .db
        .get_deck(auth.user_id, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id}")))?;

    let cards = state.db.get_deck_cards(auth.user_id, deck.id).await?;
    let session = assemble_session(cards, state.clock.now());

    tracing::debug!(
        deck_id,
        due = session.due_count,
        total = session.total_count,
        selected = session.cards.len(),
        fallback = session.fallback,
        "Assembled learning session"
    );

    Ok(Json(LearnSessionResponse {
        deck_id: deck.id,
        due_count: session.due_count,
        total_count: session.total_count,
        fallback: session.fallback,
        cards: session
            .cards
            .iter()
            .map(|c| c.to_learn_card(&deck.deck_name))
            .collect(),
    }))
}

/// POST /api/learn
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    payload: std::result::Result<Json<SubmitReviewRequest>, JsonRejection>,
) -> Result<Json<SubmitReviewResponse>> {
    let Json(payload) = payload?;

    // Reject bad ratings before touching the database
    let difficulty = Difficulty::try_from(payload.difficulty)?;

    let now = state.clock.now();
    let scheduler = &state.scheduler;

    let next = state
        .db
        .apply_review(auth.user_id, payload.flashcard_id, difficulty, now, |current| {
            scheduler.schedule(difficulty, current, now)
        })
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Flashcard {}", payload.flashcard_id)))?;

    tracing::info!(
        flashcard_id = payload.flashcard_id,
        difficulty = difficulty.value(),
        interval = next.interval_days,
        review_count = next.review_count,
        "Recorded review"
    );

    Ok(Json(SubmitReviewResponse {
        flashcard_id: payload.flashcard_id,
        next_review_date: next.next_review_date,
        ease_factor: next.ease_factor,
        review_count: next.review_count,
        interval: next.interval_days,
        difficulty_label: difficulty.label().to_string(),
    }))
}
