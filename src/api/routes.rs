//! API route configuration.

use crate::api::handlers::{add_hit_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Hit ingestion and stats routes.
///
/// # Endpoints
///
/// - `POST /hit`   - Record a hit
/// - `GET  /stats` - Aggregated hit counts for a time range
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hit", post(add_hit_handler))
        .route("/stats", get(stats_handler))
}
