//! Application error type and its HTTP representation.
//!
//! Every error leaves the service as a JSON body of the form
//!
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::datetime::format_timestamp;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input; the store is never touched.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A stats range whose start lies after its end.
    #[error("Start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Storage or other infrastructure failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::InvalidRange { start, end }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::InvalidRange { start, end } => ErrorInfo {
                code: "invalid_range",
                message: "Start date is after end date".to_string(),
                details: json!({
                    "start": format_timestamp(start),
                    "end": format_timestamp(end),
                }),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();

        for (field, errs) in errors.field_errors() {
            let violations = errs
                .iter()
                .map(|e| {
                    json!({
                        "code": e.code.to_string(),
                        "message": e.message.as_ref().map(|m| m.to_string()),
                    })
                })
                .collect::<Vec<_>>();
            fields.insert(field.to_string(), Value::Array(violations));
        }

        AppError::bad_request("Validation failed", Value::Object(fields))
    }
}
