use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_core::models::{
    booking::{LoadStatus, StatusResponse},
    person::Candidate,
};

use crate::test_utils::{TestContext, candidates, engineers};

#[tokio::test]
async fn test_status_reports_loading_then_ready() {
    let (server, state) = TestContext::healthy().server();

    let status: StatusResponse = server.get("/api/status").await.json();
    assert_eq!(status.status, LoadStatus::Loading);

    state.reload().await;

    let status: StatusResponse = server.get("/api/status").await.json();
    assert_eq!(status.status, LoadStatus::Ready);
    assert_eq!(status.slot_count, 4);
}

#[tokio::test]
async fn test_failed_load_then_reload() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let mut ctx = TestContext::new();
    let seen = Arc::clone(&attempts);
    ctx.directory.expect_fetch_engineers().returning(move || {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(eyre::eyre!("Failed to load engineers.json: status 500"))
        } else {
            Ok(engineers())
        }
    });
    ctx.directory
        .expect_fetch_candidates()
        .returning(|| Ok(candidates()));
    let (server, state) = ctx.server();
    state.reload().await;

    let status: StatusResponse = server.get("/api/status").await.json();
    assert_eq!(status.status, LoadStatus::Failed);
    assert!(status.error.unwrap().contains("engineers.json"));
    assert_eq!(
        server.get("/api/slots").await.status_code(),
        StatusCode::BAD_GATEWAY
    );

    let status: StatusResponse = server.post("/api/reload").await.json();
    assert_eq!(status.status, LoadStatus::Ready);
    assert_eq!(server.get("/api/slots").await.status_code(), StatusCode::OK);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_reference_data_endpoints() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let listed: Vec<Candidate> = server.get("/api/candidates").await.json();
    assert_eq!(listed, candidates());

    let engineers: Value = server.get("/api/engineers").await.json();
    assert_eq!(engineers[0]["color"], json!("#10B981"));
    assert_eq!(engineers[0]["firstName"], json!("Alan"));
}

#[tokio::test]
async fn test_health_reports_data_state() {
    let (server, _state) = TestContext::healthy().server();

    let health: Value = server.get("/health").await.json();

    assert_eq!(health, json!({ "status": "ok", "data": "loading" }));
}
