//! Handler for hit ingestion.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::json;

use crate::api::dto::hit::NewHitRequest;
use crate::domain::entities::NewHit;
use crate::error::AppError;
use crate::state::AppState;

/// Records a hit.
///
/// # Endpoint
///
/// `POST /hit`
///
/// # Request Body
///
/// ```json
/// {
///   "app": "ewm-main-service",
///   "uri": "/events/1",
///   "ip": "192.163.0.1",
///   "timestamp": "2022-09-06 11:00:23"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with an empty body.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON of the expected
/// shape or if any field fails validation. Nothing is stored in that case.
pub async fn add_hit_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewHitRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    tracing::info!(
        app = ?request.app,
        uri = ?request.uri,
        ip = ?request.ip,
        timestamp = ?request.timestamp,
        "Add hit request"
    );

    let new_hit = NewHit::try_from(request)?;
    state.hit_service.add_hit(new_hit).await?;

    Ok(StatusCode::CREATED)
}
