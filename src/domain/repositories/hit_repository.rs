//! Repository trait for hit persistence and aggregation.

use crate::domain::aggregation::StatsQuery;
use crate::domain::entities::{Hit, NewHit, StatsItem};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of hits.
///
/// Inserting and aggregating are the only operations; hits are never updated
/// or removed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryHitRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_hit.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Stores a validated hit and returns it with its assigned id.
    ///
    /// Ids are unique and ascending in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn insert(&self, new_hit: NewHit) -> Result<Hit, AppError>;

    /// Aggregates stored hits according to `query`.
    ///
    /// Results are ordered by `hits`, highest first. A query matching nothing
    /// returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn stats(&self, query: &StatsQuery) -> Result<Vec<StatsItem>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn ping(&self) -> Result<(), AppError>;
}
