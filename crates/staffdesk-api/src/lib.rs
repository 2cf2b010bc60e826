//! Staffdesk API crate - axum HTTP server and route handlers.
//!
//! Serves the public site and its JSON API: chat intake, job applications,
//! staffing requests, and the password-protected content editor.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
