//! Route handler functions for all API endpoints.
//!
//! Request bodies are read as raw bytes and parsed leniently: an empty body
//! counts as `{}`, malformed JSON as no body at all. Field checks then
//! follow JavaScript-style truthiness so the browser forms behave the same
//! whatever they send.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use staffdesk_chat::validate_message;
use staffdesk_storage::{flatten, submission_record, unflatten, ChatLogEntry};

use crate::error::ApiError;
use crate::state::AppState;

/// Session used when the client sends none.
pub const DEFAULT_SESSION_ID: &str = "default";

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Conversations currently mid-qualification.
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Body helpers
// =============================================================================

/// Parse a request body. Empty is `{}`; malformed JSON is `None`.
fn parse_body(body: &Bytes) -> Option<Value> {
    if body.is_empty() {
        return Some(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).ok()
}

/// JavaScript truthiness for a JSON field.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Body as an object whose `required` fields are all truthy.
fn require_fields(
    body: Option<Value>,
    required: &[&str],
    message: &str,
) -> Result<Map<String, Value>, ApiError> {
    match body {
        Some(Value::Object(map)) if required.iter().all(|k| truthy(map.get(*k))) => Ok(map),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}

/// Session identifier from a chat body.
///
/// Falsy values map to [`DEFAULT_SESSION_ID`]; numbers and booleans are
/// stringified.
fn session_id_of(body: &Value) -> String {
    let raw = body.get("sessionId");
    if !truthy(raw) {
        return DEFAULT_SESSION_ID.to_string();
    }
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => DEFAULT_SESSION_ID.to_string(),
    }
}

// =============================================================================
// Public endpoints
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let active_sessions = state.engine.store().len()?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions,
    }))
}

/// GET /api/content - the site content document.
pub async fn get_content(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.content.read()?))
}

/// POST /api/chat - one conversational turn.
///
/// Every turn is journaled. A journal failure is logged and the reply is
/// still returned, since the session has already moved on.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let body = parse_body(&body).unwrap_or(Value::Null);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;
    let message = validate_message(message, state.config.chat.max_message_length)?;

    let session_id = session_id_of(&body);
    let contact = state.contact_email();
    let outcome = state.engine.turn(&session_id, message, &contact)?;

    let entry = ChatLogEntry::new(
        session_id.as_str(),
        message,
        outcome.reply.as_str(),
        outcome.lead.as_ref(),
    );
    if let Err(e) = state.chat_log.append(&entry) {
        tracing::error!(error = %e, session_id = %session_id, "Failed to journal chat turn");
    }

    Ok(Json(ChatResponse {
        reply: outcome.reply,
        done: outcome.done,
    }))
}

/// POST /api/apply - job application form.
pub async fn apply(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let fields = require_fields(
        parse_body(&body),
        &["name", "email", "jobId"],
        "name, email and jobId are required",
    )?;

    state.applications.append(&submission_record(fields))?;
    tracing::info!("Job application received");

    Ok(Json(SubmissionResponse {
        success: true,
        message: "Application submitted successfully.".to_string(),
    }))
}

/// POST /api/request-talent - employer staffing request form.
pub async fn request_talent(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let fields = require_fields(
        parse_body(&body),
        &["facility", "contactName", "email"],
        "facility, contactName, and email are required",
    )?;

    state.staff_requests.append(&submission_record(fields))?;
    tracing::info!("Staffing request received");

    Ok(Json(SubmissionResponse {
        success: true,
        message: "Staffing request submitted.".to_string(),
    }))
}

// =============================================================================
// Admin endpoints
// =============================================================================

/// POST /api/admin/login - trade the admin password for a token.
pub async fn admin_login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let password = parse_body(&body)
        .as_ref()
        .and_then(|b| b.get("password"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if password.as_deref() != Some(state.config.admin.password.as_str()) {
        tracing::warn!("Admin login rejected");
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.issue_admin_token()?;
    tracing::info!("Admin token issued");
    Ok(Json(LoginResponse { token }))
}

/// PUT /api/admin/content - replace the whole content document.
pub async fn admin_put_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let content =
        parse_body(&body).ok_or_else(|| ApiError::BadRequest("Invalid payload".to_string()))?;
    state.content.write(&content)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/admin/content/fields - content as dotted-path leaves.
pub async fn admin_get_fields(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Value>>, ApiError> {
    Ok(Json(flatten(&state.content.read()?)))
}

/// PUT /api/admin/content/fields - rebuild content from dotted-path leaves.
pub async fn admin_put_fields(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let fields = match parse_body(&body) {
        Some(Value::Object(map)) => map,
        _ => return Err(ApiError::BadRequest("Invalid payload".to_string())),
    };
    state.content.write(&unflatten(&fields)?)?;
    Ok(Json(SuccessResponse { success: true }))
}
