//! Hit entity representing a single recorded visit.

use chrono::NaiveDateTime;

/// A visit event recorded for an application URI.
///
/// Hits are append-only: once stored they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
}

impl Hit {
    /// Creates a new Hit instance.
    pub fn new(id: i64, app: String, uri: String, ip: String, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            app,
            uri,
            ip,
            timestamp,
        }
    }
}

/// Input data for recording a new hit.
///
/// Fields are expected to be validated already; the `id` is assigned by the
/// store on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHit {
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
}

impl NewHit {
    /// Attaches a store-assigned identifier, producing the persisted entity.
    pub fn into_hit(self, id: i64) -> Hit {
        Hit::new(id, self.app, self.uri, self.ip, self.timestamp)
    }
}
