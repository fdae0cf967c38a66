use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_core::{
    filter::PersonFilter,
    models::booking::{Selection, SlotsResponse},
};

use crate::test_utils::{TestContext, at, slot_id};

#[tokio::test]
async fn test_slots_unavailable_while_loading() {
    let (server, _state) = TestContext::healthy().server();

    let response = server.get("/api/slots").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_default_view_lists_every_slot() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server.get("/api/slots").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert_eq!(body.filter, PersonFilter::None);
    assert_eq!(body.duration.minutes(), 15);
    assert_eq!(body.slots.len(), 4);
    assert_eq!(body.slots[0].title, "Alan Turing - Free");
}

#[tokio::test]
async fn test_candidate_view_with_durations() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server
        .put("/api/view")
        .json(&json!({
            "filter": { "filterType": "candidate", "filterId": "c1" },
            "duration": 15
        }))
        .await;
    let body: SlotsResponse = response.json();
    let starts: Vec<_> = body.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(9, 0), at(9, 15)]);

    let response = server
        .put("/api/view")
        .json(&json!({
            "filter": { "filterType": "candidate", "filterId": "c1" },
            "duration": 30
        }))
        .await;
    let body: SlotsResponse = response.json();
    let starts: Vec<_> = body.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(9, 0)]);

    // The view sticks for later reads.
    let body: SlotsResponse = server.get("/api/slots").await.json();
    assert_eq!(body.slots.len(), 1);
}

#[tokio::test]
async fn test_unknown_candidate_shows_nothing() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server
        .put("/api/view")
        .json(&json!({ "filter": { "filterType": "candidate", "filterId": "nobody" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: SlotsResponse = response.json();
    assert!(body.slots.is_empty());
}

#[tokio::test]
async fn test_invalid_duration_is_rejected() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server
        .put("/api/view")
        .json(&json!({ "duration": 25 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_prefills_booking_form() {
    let (server, _state) = TestContext::healthy().loaded_server().await;
    server
        .put("/api/view")
        .json(&json!({ "filter": { "filterType": "candidate", "filterId": "c1" } }))
        .await;

    let response = server.post(&format!("/api/slots/{}/select", slot_id(9, 15))).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let selection: Selection = response.json();
    assert_eq!(selection.slot.start, at(9, 15));
    assert_eq!(selection.initial_candidate_id.as_deref(), Some("c1"));
    assert_eq!(selection.initial_engineer_id, "e1");

    let current: Option<Selection> = server.get("/api/selection").await.json();
    assert_eq!(current, Some(selection));
}

#[tokio::test]
async fn test_clear_selection() {
    let (server, _state) = TestContext::healthy().loaded_server().await;
    server.post(&format!("/api/slots/{}/select", slot_id(9, 0))).await;

    let response = server.delete("/api/selection").await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let current: Option<Selection> = server.get("/api/selection").await.json();
    assert_eq!(current, None);
}

#[tokio::test]
async fn test_select_unknown_slot() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server.post("/api/slots/e1-0/select").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
