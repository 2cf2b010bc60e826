//! Router setup with all API routes, static files and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use staffdesk_core::error::StaffdeskError;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
///
/// Unknown paths are served from the public directory, falling back to
/// its `index.html` so client-side routes still load the site.
pub fn create_router(state: AppState) -> Router {
    // The public site and admin page may be hosted elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let public_dir = state.public_dir();
    let site = ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/content", get(handlers::get_content))
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")));

    // Form and chat submissions share one per-second budget.
    let limiter = RateLimiter::new(state.config.server.rate_limit_per_sec);
    let submission_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/apply", post(handlers::apply))
        .route("/api/request-talent", post(handlers::request_talent))
        .route("/api/admin/login", post(handlers::admin_login))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(limiter));

    let admin_routes = Router::new()
        .route("/api/admin/content", put(handlers::admin_put_content))
        .route(
            "/api/admin/content/fields",
            get(handlers::admin_get_fields).put(handlers::admin_put_fields),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ));

    let body_limit = state.config.server.body_limit_bytes;

    public_routes
        .merge(submission_routes)
        .merge(admin_routes)
        .fallback_service(site)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to `server.host:server.port` and serve until the process exits.
pub async fn start_server(state: AppState) -> Result<(), StaffdeskError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StaffdeskError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Staffdesk listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| StaffdeskError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
