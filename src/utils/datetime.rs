//! Timestamp handling for the `yyyy-MM-dd HH:mm:ss` wire format.
//!
//! Timestamps are naive (no time zone) with second precision, both on the
//! wire and in storage.

use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `chrono` format string for every timestamp the service accepts or emits.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zero-padded fields only; `chrono` alone also takes `2022-9-6 1:0:3`.
static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("timestamp pattern is valid")
});

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("expected yyyy-MM-dd HH:mm:ss, got '{0}'")]
    Format(String),

    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Parses a timestamp in the fixed wire format.
///
/// # Errors
///
/// Returns [`TimestampError::Format`] unless the input is exactly
/// `yyyy-MM-dd HH:mm:ss` (zero-padded, no surrounding whitespace, no sign,
/// no leap second), and [`TimestampError::Parse`] for an impossible date or
/// time such as month 13.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    if !TIMESTAMP_SHAPE.is_match(value) {
        return Err(TimestampError::Format(value.to_string()));
    }

    let parsed = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)?;

    // `:60` parses as a leap second
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::Format(value.to_string()));
    }

    Ok(parsed)
}

/// Formats a timestamp in the fixed wire format.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}
