//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod hit_repository;

pub use hit_repository::HitRepository;

#[cfg(test)]
pub use hit_repository::MockHitRepository;
