//! Core domain entities.
//!
//! - [`Hit`] - A recorded visit, with [`NewHit`] as its creation input
//! - [`StatsItem`] - One aggregated `(app, uri, hits)` row
//!
//! Entities are plain data; persistence lives behind
//! [`crate::domain::repositories::HitRepository`].

pub mod hit;
pub mod stats_item;

pub use hit::{Hit, NewHit};
pub use stats_item::StatsItem;
