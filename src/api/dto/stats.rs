//! DTOs for the stats endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::entities::StatsItem;
use crate::error::AppError;
use crate::utils::datetime::parse_timestamp;

/// One aggregated row in the `GET /stats` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsItemDto {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

impl From<StatsItem> for StatsItemDto {
    fn from(item: StatsItem) -> Self {
        Self {
            app: item.app,
            uri: item.uri,
            hits: item.hits,
        }
    }
}

/// Parsed query string of `GET /stats`.
///
/// Built from raw `(name, value)` pairs because `uris` may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsParams {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uris: Option<Vec<String>>,
    pub unique: bool,
}

impl StatsParams {
    /// Parses the query pairs.
    ///
    /// # Parameters
    ///
    /// - `start`, `end` (required): `yyyy-MM-dd HH:mm:ss`
    /// - `uris` (optional, repeatable): either `uris=a&uris=b` or `uris=a,b`
    /// - `unique` (optional): `true` or `false`, default `false`
    ///
    /// Unknown parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every missing or malformed
    /// parameter.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut start = None;
        let mut end = None;
        let mut uris: Option<Vec<String>> = None;
        let mut unique = None;
        let mut problems = Map::new();

        for (name, value) in pairs {
            match name.as_str() {
                "start" => start = Some(value),
                "end" => end = Some(value),
                "uris" => uris.get_or_insert_with(Vec::new).extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|u| !u.is_empty())
                        .map(str::to_string),
                ),
                "unique" => unique = Some(value),
                _ => {}
            }
        }

        let start = required_timestamp("start", start, &mut problems);
        let end = required_timestamp("end", end, &mut problems);

        let unique = match unique.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(v) => {
                problems.insert(
                    "unique".to_string(),
                    json!(format!("expected true or false, got '{v}'")),
                );
                false
            }
        };

        match (start, end) {
            (Some(start), Some(end)) if problems.is_empty() => Ok(Self {
                start,
                end,
                uris,
                unique,
            }),
            _ => Err(AppError::bad_request(
                "Invalid query parameters",
                Value::Object(problems),
            )),
        }
    }
}

fn required_timestamp(
    name: &str,
    value: Option<String>,
    problems: &mut Map<String, Value>,
) -> Option<NaiveDateTime> {
    let Some(value) = value else {
        problems.insert(name.to_string(), json!("required parameter is missing"));
        return None;
    };

    match parse_timestamp(&value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            problems.insert(
                name.to_string(),
                json!(format!("expected yyyy-MM-dd HH:mm:ss, got '{value}'")),
            );
            None
        }
    }
}
