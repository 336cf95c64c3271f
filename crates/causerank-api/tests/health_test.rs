use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use causerank::engine::OverlapEngine;
use causerank::pool::{PoolConfig, WorkerPool};
use causerank::trainlog::MemoryTrainLog;
use causerank_api::{AppState, build_app};
use causerank_core::{Index, Page, SharedEngine};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

fn create_test_app() -> axum::Router {
    let engine: SharedEngine = Arc::new(OverlapEngine::new());
    let index = Arc::new(Index::new(vec![Page {
        title: "Birdsong".to_string(),
        text: "Birds sing to mark territory.".to_string(),
    }]));
    let pool = Arc::new(WorkerPool::new(
        Arc::clone(&engine),
        Arc::clone(&index),
        &PoolConfig {
            workers: 1,
            ..PoolConfig::default()
        },
    ));
    let train_log = Arc::new(MemoryTrainLog::new());
    build_app(AppState::new(engine, index, pool, train_log))
}

#[tokio::test]
async fn test_health_check() {
    let mut app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "causerank-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
