//! HTTP request handlers for API endpoints.

pub mod health;
pub mod hit;
pub mod stats;

pub use health::health_handler;
pub use hit::add_hit_handler;
pub use stats::stats_handler;
