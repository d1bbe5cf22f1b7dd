//! Utility functions shared across layers.
//!
//! - [`datetime`] - Fixed-format timestamp parsing and formatting
//! - [`ipv4`] - Dotted-quad IPv4 address matching

pub mod datetime;
pub mod ipv4;
