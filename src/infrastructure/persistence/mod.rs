//! Hit store implementations.
//!
//! - [`PgHitRepository`] - PostgreSQL storage using SQLx
//! - [`MemoryHitRepository`] - Process-local storage for development and tests

pub mod memory_hit_repository;
pub mod pg_hit_repository;

pub use memory_hit_repository::MemoryHitRepository;
pub use pg_hit_repository::PgHitRepository;
