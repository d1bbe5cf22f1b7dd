//! PostgreSQL implementation of the hit repository.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::aggregation::StatsQuery;
use crate::domain::entities::{Hit, NewHit, StatsItem};
use crate::domain::repositories::HitRepository;
use crate::error::AppError;

const NON_UNIQUE_HITS: &str = r#"
    SELECT h.app, h.uri, COUNT(h.id) AS hits
    FROM hits h
    WHERE h.timestamp BETWEEN $1 AND $2
    GROUP BY h.app, h.uri
    ORDER BY hits DESC, h.app, h.uri
"#;

const NON_UNIQUE_HITS_IN_URIS: &str = r#"
    SELECT h.app, h.uri, COUNT(h.id) AS hits
    FROM hits h
    WHERE h.timestamp BETWEEN $1 AND $2
      AND h.uri = ANY($3)
    GROUP BY h.app, h.uri
    ORDER BY hits DESC, h.app, h.uri
"#;

const UNIQUE_HITS: &str = r#"
    SELECT h.app, h.uri, COUNT(DISTINCT h.ip) AS hits
    FROM hits h
    WHERE h.timestamp BETWEEN $1 AND $2
    GROUP BY h.app, h.uri
    ORDER BY hits DESC, h.app, h.uri
"#;

const UNIQUE_HITS_IN_URIS: &str = r#"
    SELECT h.app, h.uri, COUNT(DISTINCT h.ip) AS hits
    FROM hits h
    WHERE h.timestamp BETWEEN $1 AND $2
      AND h.uri = ANY($3)
    GROUP BY h.app, h.uri
    ORDER BY hits DESC, h.app, h.uri
"#;

/// PostgreSQL repository for hits.
///
/// Each stats query is a single statement over the `hits` table, so it reads
/// one consistent snapshot.
pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Picks one of the four aggregation statements for a query.
    fn statement_for(query: &StatsQuery) -> &'static str {
        match (query.unique, query.has_uri_filter()) {
            (false, false) => NON_UNIQUE_HITS,
            (false, true) => NON_UNIQUE_HITS_IN_URIS,
            (true, false) => UNIQUE_HITS,
            (true, true) => UNIQUE_HITS_IN_URIS,
        }
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn insert(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO hits (app, uri, ip, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_hit.app)
        .bind(&new_hit.uri)
        .bind(&new_hit.ip)
        .bind(new_hit.timestamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(new_hit.into_hit(id))
    }

    async fn stats(&self, query: &StatsQuery) -> Result<Vec<StatsItem>, AppError> {
        let mut statement = sqlx::query_as::<_, (String, String, i64)>(Self::statement_for(query))
            .bind(query.start)
            .bind(query.end);

        if query.has_uri_filter() {
            statement = statement.bind(&query.uris);
        }

        let rows = statement.fetch_all(self.pool.as_ref()).await?;

        Ok(rows
            .into_iter()
            .map(|(app, uri, hits)| StatsItem { app, uri, hits })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// Loads every stored hit in a time range, oldest first.
///
/// Used by the admin tooling; the service itself only reads aggregates.
pub async fn fetch_hits_between(
    pool: &PgPool,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<Hit>, AppError> {
    let rows = sqlx::query_as::<_, (i64, String, String, String, NaiveDateTime)>(
        r#"
        SELECT id, app, uri, ip, timestamp
        FROM hits
        WHERE timestamp BETWEEN $1 AND $2
        ORDER BY timestamp, id
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, app, uri, ip, timestamp)| Hit::new(id, app, uri, ip, timestamp))
        .collect())
}
