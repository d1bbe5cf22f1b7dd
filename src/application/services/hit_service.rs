//! Hit recording and statistics service.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::aggregation::StatsQuery;
use crate::domain::entities::{NewHit, StatsItem};
use crate::domain::repositories::HitRepository;
use crate::error::AppError;

/// Service for recording hits and reading aggregated statistics.
///
/// Holds the store behind a trait object so the same service runs against
/// PostgreSQL or the in-memory repository.
pub struct HitService {
    repository: Arc<dyn HitRepository>,
}

impl HitService {
    /// Creates a new hit service.
    pub fn new(repository: Arc<dyn HitRepository>) -> Self {
        Self { repository }
    }

    /// Records a validated hit and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn add_hit(&self, new_hit: NewHit) -> Result<i64, AppError> {
        let hit = self.repository.insert(new_hit).await?;
        debug!(id = hit.id, app = %hit.app, uri = %hit.uri, "Added a new hit");
        Ok(hit.id)
    }

    /// Aggregates hits in `[start, end]`, optionally restricted to `uris`.
    ///
    /// With `unique` set, each group counts distinct client IPs instead of
    /// hits. `None` and an empty list both mean "all URIs".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] if `start` is after `end`; the store is
    /// not queried in that case.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: bool,
    ) -> Result<Vec<StatsItem>, AppError> {
        let query = StatsQuery::new(start, end)?
            .with_uris(uris.unwrap_or_default())
            .with_unique(unique);

        let stats = self.repository.stats(&query).await?;
        debug!(count = stats.len(), "Found view stats");
        Ok(stats)
    }

    /// Checks that the underlying store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
