//! Process-local hit repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::aggregation::{StatsQuery, aggregate};
use crate::domain::entities::{Hit, NewHit, StatsItem};
use crate::domain::repositories::HitRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    last_id: i64,
    hits: Vec<Hit>,
}

/// A hit repository that keeps everything in memory.
///
/// Data is lost when the process exits.
///
/// # Use Cases
///
/// - Development environments without PostgreSQL (`HIT_STORAGE=memory`)
/// - HTTP and client tests that should not need a database
pub struct MemoryHitRepository {
    store: RwLock<Store>,
}

impl MemoryHitRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory hit storage");
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Number of stored hits.
    pub async fn len(&self) -> usize {
        self.store.read().await.hits.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryHitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HitRepository for MemoryHitRepository {
    async fn insert(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let hit = new_hit.into_hit(store.last_id);
        store.hits.push(hit.clone());

        Ok(hit)
    }

    async fn stats(&self, query: &StatsQuery) -> Result<Vec<StatsItem>, AppError> {
        let store = self.store.read().await;
        Ok(aggregate(&store.hits, query))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
