//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated user info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Auth middleware - resolves the bearer token to a live session
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(&request)?.to_string();

    let session = state
        .db
        .get_session_by_token(&token, state.clock.now())
        .await?
        .ok_or_else(|| {
            tracing::warn!("Rejected request with unknown or expired session");
            ApiError::Unauthorized("Invalid or expired session".to_string())
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: session.user_id,
    });

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn bearer_token(request: &Request<Body>) -> Result<&str> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))
}
