//! Admin authentication via bearer tokens.
//!
//! `POST /api/admin/login` trades the configured password for a random
//! token. Tokens live in memory until the process exits.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::Rng;

use crate::error::ApiError;
use crate::state::AppState;

/// Generate a random 32-character hex token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    hex::encode(bytes)
}

/// Token from an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that admits only requests carrying an issued admin token.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| state.is_admin_token(token));

    if authorized {
        return next.run(req).await;
    }

    tracing::warn!(path = %req.uri().path(), "Rejected admin request without a valid token");
    ApiError::Unauthorized("Unauthorized".to_string()).into_response()
}
