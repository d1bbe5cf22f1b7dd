//! HTTP client for other services that record hits or read stats.
//!
//! ```no_run
//! # async fn demo() -> Result<(), hit_stats::client::ClientError> {
//! use chrono::Utc;
//! use hit_stats::client::StatsClient;
//!
//! let client = StatsClient::new("http://stats-server:9090")?;
//! let now = Utc::now().naive_utc();
//!
//! client.add_hit("main-service", "/events/1", "192.163.0.1", &now).await?;
//!
//! let response = client.get_stats(&now, &now, None, false).await?;
//! if response.is_success() {
//!     println!("{}", response.text());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::api::dto::hit::NewHitRequest;
use crate::utils::datetime::format_timestamp;

/// Errors raised by [`StatsClient`].
///
/// Only transport problems are errors; any HTTP status the server answers
/// with is handed back to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Raw answer of `GET /stats`: status and body exactly as the server sent them.
#[derive(Debug, Clone)]
pub struct StatsResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl StatsResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON, e.g. into `Vec<StatsItemDto>` on success or
    /// `serde_json::Value` for an error body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Client for the hit-stats HTTP API.
#[derive(Debug, Clone)]
pub struct StatsClient {
    base_url: Url,
    client: Client,
}

impl StatsClient {
    /// Creates a client for the server at `server_url` (e.g. `http://localhost:9090`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `server_url` is not an absolute URL.
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base = server_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .user_agent(concat!("hit-stats-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Submits one hit with `POST /hit`.
    ///
    /// The returned status is informational; a rejected hit (`400`) is not an
    /// error here.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the request could not be sent.
    pub async fn add_hit(
        &self,
        app: &str,
        uri: &str,
        ip: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<StatusCode, ClientError> {
        let url = self.base_url.join("hit")?;
        let body = NewHitRequest::new(app, uri, ip, timestamp);

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(%status, app, uri, "Hit was not accepted");
        }

        Ok(status)
    }

    /// Fetches aggregated stats with `GET /stats`.
    ///
    /// `uris` of `None` or an empty slice sends no `uris` parameter. Non-2xx
    /// answers are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the request could not be sent or
    /// the body could not be read.
    pub async fn get_stats(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
        uris: Option<&[String]>,
        unique: bool,
    ) -> Result<StatsResponse, ClientError> {
        let url = self.stats_url(start, end, uris, unique)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(StatsResponse { status, body })
    }

    fn stats_url(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
        uris: Option<&[String]>,
        unique: bool,
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.join("stats")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("start", &format_timestamp(start))
                .append_pair("end", &format_timestamp(end));

            for uri in uris.unwrap_or_default() {
                query.append_pair("uris", uri);
            }

            query.append_pair("unique", if unique { "true" } else { "false" });
        }
        Ok(url)
    }
}
