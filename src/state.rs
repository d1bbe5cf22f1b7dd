//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::HitService;
use crate::domain::repositories::HitRepository;

#[derive(Clone)]
pub struct AppState {
    pub hit_service: Arc<HitService>,
}

impl AppState {
    /// Builds the state around a hit store.
    pub fn new(repository: Arc<dyn HitRepository>) -> Self {
        Self {
            hit_service: Arc::new(HitService::new(repository)),
        }
    }
}
