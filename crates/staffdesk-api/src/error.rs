//! API error types and JSON error response formatting.
//!
//! Every rejection answers with `{"error": <code>, "message": <text>}`.
//! Internal failures are logged in full and answered with a generic
//! message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use staffdesk_chat::ChatError;
use staffdesk_core::error::StaffdeskError;
use staffdesk_storage::StorageError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "unauthorized").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 - missing or invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// 401 - wrong password or missing/unknown admin token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// 429 - per-second request budget exhausted.
    #[error("rate limit exceeded")]
    TooManyRequests,
    /// 500 - detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "too_many_requests",
                "Rate limit exceeded".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match &err {
            ChatError::EmptyMessage => ApiError::BadRequest("Message is required".to_string()),
            ChatError::MessageTooLong(max) => ApiError::BadRequest(format!(
                "Message exceeds maximum length of {} characters",
                *max
            )),
            ChatError::SessionStore(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotAnObject | StorageError::InvalidPath(_) => {
                ApiError::BadRequest("Invalid payload".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StaffdeskError> for ApiError {
    fn from(err: StaffdeskError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
