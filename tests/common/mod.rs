#![allow(dead_code)]

use axum_test::TestServer;
use hit_stats::domain::entities::NewHit;
use hit_stats::domain::repositories::HitRepository;
use hit_stats::infrastructure::persistence::MemoryHitRepository;
use hit_stats::routes::router;
use hit_stats::state::AppState;
use hit_stats::utils::datetime::parse_timestamp;
use std::sync::Arc;

pub const FULL_START: &str = "2010-01-01 00:00:00";
pub const FULL_END: &str = "2030-12-31 23:59:59";
pub const NARROW_START: &str = "2019-01-01 00:00:00";
pub const NARROW_END: &str = "2024-12-31 23:59:59";

/// app1/uri1 ×4 from 3 IPs, app2/uri2 ×1, app3/uri3 ×3 from 2 IPs.
pub const SAMPLE_HITS: [(&str, &str, &str, &str); 8] = [
    ("app1", "uri1", "169.124.159.122", "2018-07-15 16:40:10"),
    ("app2", "uri2", "169.124.159.122", "2019-07-15 16:40:10"),
    ("app1", "uri1", "169.124.159.199", "2020-07-15 16:40:10"),
    ("app3", "uri3", "169.124.159.199", "2021-07-15 16:40:10"),
    ("app3", "uri3", "169.124.159.122", "2022-07-15 16:40:10"),
    ("app3", "uri3", "169.124.159.122", "2023-07-15 16:40:10"),
    ("app1", "uri1", "169.124.159.199", "2024-07-15 16:40:10"),
    ("app1", "uri1", "169.124.159.201", "2025-07-15 16:40:10"),
];

pub fn new_hit(app: &str, uri: &str, ip: &str, timestamp: &str) -> NewHit {
    NewHit {
        app: app.to_string(),
        uri: uri.to_string(),
        ip: ip.to_string(),
        timestamp: parse_timestamp(timestamp).unwrap(),
    }
}

pub async fn seed_sample_hits(repo: &dyn HitRepository) {
    for (app, uri, ip, timestamp) in SAMPLE_HITS {
        repo.insert(new_hit(app, uri, ip, timestamp)).await.unwrap();
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryHitRepository>) {
    let repo = Arc::new(MemoryHitRepository::new());
    let state = AppState::new(repo.clone());
    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryHitRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, repo)
}

pub async fn create_seeded_server() -> TestServer {
    let (server, repo) = create_test_server();
    seed_sample_hits(repo.as_ref()).await;
    server
}

/// `(app, hits)` pairs of a `GET /stats` body.
pub fn app_counts(body: &serde_json::Value) -> Vec<(String, i64)> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["app"].as_str().unwrap().to_string(),
                item["hits"].as_i64().unwrap(),
            )
        })
        .collect()
}
