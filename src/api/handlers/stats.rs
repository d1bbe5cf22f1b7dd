//! Handler for aggregated hit statistics.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::stats::{StatsItemDto, StatsParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns hit counts per `(app, uri)` for a time range.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Query Parameters
///
/// - `start` (required): range start, inclusive (`yyyy-MM-dd HH:mm:ss`)
/// - `end` (required): range end, inclusive (`yyyy-MM-dd HH:mm:ss`)
/// - `uris` (optional, repeatable): only count these URIs
/// - `unique` (optional): count distinct IPs instead of hits (default: `false`)
///
/// # Response
///
/// ```json
/// [
///   { "app": "ewm-main-service", "uri": "/events/1", "hits": 6 },
///   { "app": "ewm-main-service", "uri": "/events/2", "hits": 2 }
/// ]
/// ```
///
/// Ordered by `hits`, highest first.
///
/// # Errors
///
/// Returns 400 Bad Request if a required parameter is missing or malformed,
/// or if `start` is after `end`.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<StatsItemDto>>, AppError> {
    let params = StatsParams::from_pairs(pairs)?;

    tracing::info!(
        start = %params.start,
        end = %params.end,
        uris = ?params.uris,
        unique = params.unique,
        "Get stats request"
    );

    let stats = state
        .hit_service
        .get_stats(params.start, params.end, params.uris, params.unique)
        .await?;

    Ok(Json(stats.into_iter().map(StatsItemDto::from).collect()))
}
