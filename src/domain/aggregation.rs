//! Hit aggregation: range and URI selection, grouping, counting, ordering.
//!
//! [`StatsQuery`] describes what to aggregate and is shared by every store.
//! [`aggregate`] is the in-process evaluation used by
//! [`crate::infrastructure::persistence::MemoryHitRepository`]; the PostgreSQL
//! store evaluates the same query in SQL.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;

use crate::domain::entities::{Hit, StatsItem};
use crate::error::AppError;

/// Parameters of a stats query.
///
/// The range is inclusive on both ends. An empty `uris` list means no URI
/// filter. Construct with [`StatsQuery::new`], which rejects inverted ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uris: Vec<String>,
    pub unique: bool,
}

impl StatsQuery {
    /// Creates an unfiltered, non-unique query over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::invalid_range(start, end));
        }

        Ok(Self {
            start,
            end,
            uris: Vec::new(),
            unique: false,
        })
    }

    /// Restricts the query to the given URIs.
    pub fn with_uris(mut self, uris: impl IntoIterator<Item = String>) -> Self {
        self.uris = uris.into_iter().collect();
        self
    }

    /// Counts distinct IPs instead of rows when `unique` is true.
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Returns true if a URI filter is in effect.
    pub fn has_uri_filter(&self) -> bool {
        !self.uris.is_empty()
    }

    /// Returns true if the hit falls inside the range and passes the URI filter.
    pub fn matches(&self, hit: &Hit) -> bool {
        let in_range = self.start <= hit.timestamp && hit.timestamp <= self.end;
        in_range && (!self.has_uri_filter() || self.uris.iter().any(|u| *u == hit.uri))
    }
}

#[derive(Default)]
struct Group<'a> {
    rows: i64,
    ips: HashSet<&'a str>,
}

/// Aggregates hits into `(app, uri)` groups ordered by count, highest first.
///
/// Groups with equal counts come out in `(app, uri)` order. That tie order is
/// an artifact of this implementation and not part of the query contract.
pub fn aggregate<'a, I>(hits: I, query: &StatsQuery) -> Vec<StatsItem>
where
    I: IntoIterator<Item = &'a Hit>,
{
    let mut groups: BTreeMap<(&'a str, &'a str), Group<'a>> = BTreeMap::new();

    for hit in hits.into_iter().filter(|h| query.matches(h)) {
        let group = groups
            .entry((hit.app.as_str(), hit.uri.as_str()))
            .or_default();
        group.rows += 1;
        if query.unique {
            group.ips.insert(hit.ip.as_str());
        }
    }

    let mut items: Vec<StatsItem> = groups
        .into_iter()
        .map(|((app, uri), group)| {
            let hits = if query.unique {
                group.ips.len() as i64
            } else {
                group.rows
            };
            StatsItem::new(app, uri, hits)
        })
        .collect();

    // stable sort keeps the (app, uri) order among ties
    items.sort_by(|a, b| b.hits.cmp(&a.hits));
    items
}
