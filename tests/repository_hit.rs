//! PostgreSQL store tests. Each test gets a fresh database with migrations
//! applied; run with `cargo test -- --ignored` and `DATABASE_URL` set.

mod common;

use common::{FULL_END, FULL_START, NARROW_END, NARROW_START};
use hit_stats::domain::aggregation::StatsQuery;
use hit_stats::domain::entities::StatsItem;
use hit_stats::domain::repositories::HitRepository;
use hit_stats::infrastructure::persistence::{PgHitRepository, pg_hit_repository};
use hit_stats::utils::datetime::parse_timestamp;
use sqlx::PgPool;
use std::sync::Arc;

fn query(start: &str, end: &str) -> StatsQuery {
    StatsQuery::new(parse_timestamp(start).unwrap(), parse_timestamp(end).unwrap()).unwrap()
}

fn counts(items: &[StatsItem]) -> Vec<(&str, i64)> {
    items.iter().map(|i| (i.app.as_str(), i.hits)).collect()
}

async fn seeded(pool: PgPool) -> PgHitRepository {
    let repo = PgHitRepository::new(Arc::new(pool));
    common::seed_sample_hits(&repo).await;
    repo
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_insert_assigns_ascending_ids(pool: PgPool) {
    let repo = PgHitRepository::new(Arc::new(pool));

    let first = repo
        .insert(common::new_hit("app1", "/a", "10.0.0.1", "2022-09-06 11:00:23"))
        .await
        .unwrap();
    let second = repo
        .insert(common::new_hit("app1", "/a", "10.0.0.1", "2022-09-06 11:00:23"))
        .await
        .unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.app, "app1");
    assert_eq!(
        first.timestamp,
        parse_timestamp("2022-09-06 11:00:23").unwrap()
    );
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_all_hits(pool: PgPool) {
    let repo = seeded(pool).await;

    let items = repo.stats(&query(FULL_START, FULL_END)).await.unwrap();

    assert_eq!(counts(&items), vec![("app1", 4), ("app3", 3), ("app2", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_all_unique_hits(pool: PgPool) {
    let repo = seeded(pool).await;

    let items = repo
        .stats(&query(FULL_START, FULL_END).with_unique(true))
        .await
        .unwrap();

    assert_eq!(counts(&items), vec![("app1", 3), ("app3", 2), ("app2", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_time_ranged_hits(pool: PgPool) {
    let repo = seeded(pool).await;

    let items = repo.stats(&query(NARROW_START, NARROW_END)).await.unwrap();

    assert_eq!(counts(&items), vec![("app3", 3), ("app1", 2), ("app2", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_time_ranged_selected_unique_hits(pool: PgPool) {
    let repo = seeded(pool).await;

    let q = query(NARROW_START, NARROW_END)
        .with_uris(["uri1".to_string(), "uri3".to_string()])
        .with_unique(true);
    let items = repo.stats(&q).await.unwrap();

    assert_eq!(counts(&items), vec![("app3", 2), ("app1", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_selected_uris(pool: PgPool) {
    let repo = seeded(pool).await;

    let q = query(FULL_START, FULL_END).with_uris(["uri2".to_string()]);
    let items = repo.stats(&q).await.unwrap();

    assert_eq!(items, vec![StatsItem::new("app2", "uri2", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_inclusive_bounds(pool: PgPool) {
    let repo = seeded(pool).await;

    let items = repo
        .stats(&query("2025-07-15 16:40:10", "2025-07-15 16:40:10"))
        .await
        .unwrap();

    assert_eq!(items, vec![StatsItem::new("app1", "uri1", 1)]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_empty_window(pool: PgPool) {
    let repo = seeded(pool).await;

    let items = repo
        .stats(&query("2000-01-01 00:00:00", "2001-01-01 00:00:00"))
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_fetch_hits_between(pool: PgPool) {
    seeded(pool.clone()).await;

    let start = parse_timestamp(NARROW_START).unwrap();
    let end = parse_timestamp(NARROW_END).unwrap();
    let hits = pg_hit_repository::fetch_hits_between(&pool, start, end)
        .await
        .unwrap();

    assert_eq!(hits.len(), 6);
    assert!(hits.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgHitRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
