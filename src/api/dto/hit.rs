//! DTOs for hit ingestion.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::NewHit;
use crate::error::AppError;
use crate::utils::datetime::{format_timestamp, parse_timestamp};
use crate::utils::ipv4::is_ipv4;

/// Request body of `POST /hit`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error on that field rather than as an unreadable
/// body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewHitRequest {
    /// Application that produced the hit (1-64 characters, not blank).
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 64, message = "length must be between 1 and 64"),
        custom(function = "validate_not_blank")
    )]
    pub app: Option<String>,

    /// Visited URI (1-64 characters, not blank).
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 64, message = "length must be between 1 and 64"),
        custom(function = "validate_not_blank")
    )]
    pub uri: Option<String>,

    /// Client IPv4 address in dotted-quad form.
    #[validate(
        required(message = "must not be null"),
        custom(function = "validate_ip")
    )]
    pub ip: Option<String>,

    /// Hit time as `yyyy-MM-dd HH:mm:ss`.
    #[validate(
        required(message = "must not be null"),
        custom(function = "validate_timestamp")
    )]
    pub timestamp: Option<String>,
}

impl NewHitRequest {
    /// Builds a fully populated request, formatting the timestamp for the wire.
    pub fn new(
        app: impl Into<String>,
        uri: impl Into<String>,
        ip: impl Into<String>,
        timestamp: &NaiveDateTime,
    ) -> Self {
        Self {
            app: Some(app.into()),
            uri: Some(uri.into()),
            ip: Some(ip.into()),
            timestamp: Some(format_timestamp(timestamp)),
        }
    }
}

impl TryFrom<NewHitRequest> for NewHit {
    type Error = AppError;

    /// Validates the request and converts it into a domain hit.
    fn try_from(request: NewHitRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let (Some(app), Some(uri), Some(ip), Some(timestamp)) =
            (request.app, request.uri, request.ip, request.timestamp)
        else {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "reason": "missing field" }),
            ));
        };

        let timestamp = parse_timestamp(&timestamp).map_err(|e| {
            AppError::bad_request(
                "Validation failed",
                json!({ "timestamp": [{ "code": "format", "message": e.to_string() }] }),
            )
        })?;

        Ok(NewHit {
            app,
            uri,
            ip,
            timestamp,
        })
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("blank", "must not be blank"));
    }
    Ok(())
}

fn validate_ip(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !is_ipv4(value) {
        return Err(violation("ipv4", "must be an IPv4 address"));
    }
    Ok(())
}

fn validate_timestamp(value: &str) -> Result<(), ValidationError> {
    if parse_timestamp(value).is_err() {
        return Err(violation("format", "must match yyyy-MM-dd HH:mm:ss"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid() -> NewHitRequest {
        NewHitRequest {
            app: Some("app1".to_string()),
            uri: Some("uri1".to_string()),
            ip: Some("192.168.77.71".to_string()),
            timestamp: Some("2025-10-11 12:13:14".to_string()),
        }
    }

    fn field_codes(request: NewHitRequest, field: &str) -> Vec<String> {
        let errors = request.validate().unwrap_err();
        errors
            .field_errors()
            .iter()
            .filter(|(name, _)| name.to_string() == field)
            .flat_map(|(_, errs)| errs.iter().map(|e| e.code.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_request() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_app_is_rejected() {
        let request = NewHitRequest {
            app: Some(String::new()),
            ..valid()
        };

        assert!(!field_codes(request, "app").is_empty());
    }

    #[test]
    fn test_blank_app_is_rejected() {
        let request = NewHitRequest {
            app: Some("   ".to_string()),
            ..valid()
        };

        assert_eq!(field_codes(request, "app"), vec!["blank".to_string()]);
    }

    #[test]
    fn test_length_limits() {
        let at_limit = NewHitRequest {
            app: Some("a".repeat(64)),
            uri: Some("u".repeat(64)),
            ..valid()
        };
        assert!(at_limit.validate().is_ok());

        let too_long_app = NewHitRequest {
            app: Some("a".repeat(65)),
            ..valid()
        };
        assert_eq!(field_codes(too_long_app, "app"), vec!["length".to_string()]);

        let too_long_uri = NewHitRequest {
            uri: Some("u".repeat(65)),
            ..valid()
        };
        assert_eq!(field_codes(too_long_uri, "uri"), vec!["length".to_string()]);
    }

    #[test]
    fn test_length_counts_characters() {
        let request = NewHitRequest {
            uri: Some("/ü".repeat(32)),
            ..valid()
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_ip_is_rejected() {
        let request = NewHitRequest {
            ip: None,
            ..valid()
        };

        assert_eq!(field_codes(request, "ip"), vec!["required".to_string()]);
    }

    #[test]
    fn test_bad_ip_is_rejected() {
        let request = NewHitRequest {
            ip: Some("192.1685.77.71".to_string()),
            ..valid()
        };

        assert_eq!(field_codes(request, "ip"), vec!["ipv4".to_string()]);
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let request = NewHitRequest {
            timestamp: Some("2025-10-11T12:13:14".to_string()),
            ..valid()
        };

        assert_eq!(
            field_codes(request, "timestamp"),
            vec!["format".to_string()]
        );
    }

    #[test]
    fn test_non_padded_timestamp_is_rejected() {
        for timestamp in ["2022-9-6 11:00:23", "2022-09-06 11:00:60", "+2022-09-06 11:00:23"] {
            let request = NewHitRequest {
                timestamp: Some(timestamp.to_string()),
                ..valid()
            };

            assert_eq!(
                field_codes(request, "timestamp"),
                vec!["format".to_string()]
            );
        }
    }

    #[test]
    fn test_all_fields_reported_together() {
        let errors = NewHitRequest::default().validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_try_from_converts_valid_request() {
        let hit = NewHit::try_from(valid()).unwrap();

        assert_eq!(hit.app, "app1");
        assert_eq!(
            hit.timestamp,
            NaiveDate::from_ymd_opt(2025, 10, 11)
                .unwrap()
                .and_hms_opt(12, 13, 14)
                .unwrap()
        );
    }

    #[test]
    fn test_try_from_rejects_invalid_request() {
        let request = NewHitRequest {
            uri: Some(String::new()),
            ..valid()
        };

        assert!(matches!(
            NewHit::try_from(request),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let timestamp = NaiveDate::from_ymd_opt(2010, 1, 10)
            .unwrap()
            .and_hms_opt(15, 26, 27)
            .unwrap();
        let request = NewHitRequest::new("app1", "uri1", "192.168.0.4", &timestamp);

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["app"], "app1");
        assert_eq!(json["uri"], "uri1");
        assert_eq!(json["ip"], "192.168.0.4");
        assert_eq!(json["timestamp"], "2010-01-10 15:26:27");
    }
}
