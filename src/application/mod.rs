//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules and give HTTP
//! handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::hit_service::HitService`] - Hit recording and stats aggregation

pub mod services;
