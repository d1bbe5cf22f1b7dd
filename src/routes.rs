//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /hit`    - Record a hit
//! - `GET  /stats`  - Aggregated hit counts
//! - `GET  /health` - Health check
//!
//! Unknown paths answer `404` with the standard error body. Every request is
//! traced and trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::routes())
        .route("/health", get(health_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(tracing::layer())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
