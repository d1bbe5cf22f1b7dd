//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL and in-memory hit stores

pub mod persistence;
