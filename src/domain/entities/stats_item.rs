//! Aggregated hit count for an application URI.

/// One row of an aggregation result.
///
/// `hits` is either the number of matching hits or the number of distinct
/// client IPs among them, depending on the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsItem {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

impl StatsItem {
    pub fn new(app: impl Into<String>, uri: impl Into<String>, hits: i64) -> Self {
        Self {
            app: app.into(),
            uri: uri.into(),
            hits,
        }
    }
}
