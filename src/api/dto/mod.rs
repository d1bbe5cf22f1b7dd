//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. Incoming hits are checked with
//! `validator` before they are converted into domain types.

pub mod health;
pub mod hit;
pub mod stats;
