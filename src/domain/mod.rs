//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`aggregation`] - Stats query parameters and in-process aggregation
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; the repository traits are implemented by the infrastructure layer
//! and consumed by [`crate::application::services`].

pub mod aggregation;
pub mod entities;
pub mod repositories;
