//! Deck endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<DeckListResponse>> {
    let decks = state
        .db
        .list_decks_with_counts(auth.user_id, state.clock.now())
        .await?;
    let total = decks.len();
    Ok(Json(DeckListResponse { decks, total }))
}
