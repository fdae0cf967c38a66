use std::sync::Arc;
use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_api::{ApiState, handlers::bookings::create_booking};
use slotbook_core::models::{
    booking::{BookingRequest, BookingResponse, SlotsResponse},
    slot::{BOOKED_TITLE, SlotStatus},
};

use crate::test_utils::{SlowDirectory, TestContext, slot_id};

fn booking(slot_id: &str) -> serde_json::Value {
    json!({ "slotId": slot_id, "candidateId": "c1", "engineerId": "e1" })
}

#[tokio::test]
async fn test_booking_is_confirmed() {
    let (server, state) = TestContext::healthy().loaded_server().await;

    let response = server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: BookingResponse = response.json();
    assert_eq!(body.slot.status, SlotStatus::Booked);
    assert_eq!(body.slot.candidate_id.as_deref(), Some("c1"));
    assert_eq!(body.slot.title, BOOKED_TITLE);
    assert_eq!(body.ack.slot_id, slot_id(9, 0));

    let board = state.board.read().await;
    assert_eq!(board.slot(&slot_id(9, 0)).unwrap().status, SlotStatus::Booked);
}

#[tokio::test]
async fn test_double_booking_is_rejected() {
    let (server, _state) = TestContext::healthy().loaded_server().await;
    server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    let response = server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booked_slot_cannot_be_selected() {
    let (server, _state) = TestContext::healthy().loaded_server().await;
    server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    let response = server.post(&format!("/api/slots/{}/select", slot_id(9, 0))).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booked_slot_leaves_longer_blocks() {
    let (server, _state) = TestContext::healthy().loaded_server().await;
    server.post("/api/bookings").json(&booking(&slot_id(9, 15))).await;

    let body: SlotsResponse = server
        .put("/api/view")
        .json(&json!({ "duration": 30 }))
        .await
        .json();

    let ids: Vec<_> = body.slots.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec![slot_id(9, 30)]);
}

#[tokio::test]
async fn test_failed_confirmation_reverts_booking() {
    let mut ctx = TestContext::new();
    ctx.expect_fixtures();
    ctx.directory
        .expect_confirm_booking()
        .times(1)
        .returning(|_| Err(eyre::eyre!("booking service unavailable")));
    let (server, state) = ctx.loaded_server().await;

    let response = server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let board = state.board.read().await;
    let slot = board.slot(&slot_id(9, 0)).unwrap();
    assert_eq!(slot.status, SlotStatus::Available);
    assert_eq!(slot.candidate_id, None);
    assert_eq!(slot.title, "Alan Turing - Free");
}

#[tokio::test]
async fn test_unknown_candidate_is_not_found() {
    let (server, _state) = TestContext::healthy().loaded_server().await;

    let response = server
        .post("/api/bookings")
        .json(&json!({ "slotId": slot_id(9, 0), "candidateId": "c9", "engineerId": "e1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_survives_reload() {
    let (server, state) = TestContext::healthy().loaded_server().await;
    server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;

    let reload = server.post("/api/reload").await;
    assert_eq!(reload.status_code(), StatusCode::OK);

    let response = server.post("/api/bookings").json(&booking(&slot_id(9, 0))).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let board = state.board.read().await;
    let slot = board.slot(&slot_id(9, 0)).unwrap();
    assert_eq!(slot.status, SlotStatus::Booked);
    assert_eq!(slot.candidate_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_booking_settles_when_caller_goes_away() {
    let state = Arc::new(ApiState::new(Arc::new(SlowDirectory {
        delay: Duration::from_millis(200),
    })));
    state.reload().await;
    let request = BookingRequest {
        slot_id: slot_id(9, 0),
        candidate_id: "c1".to_string(),
        engineer_id: "e1".to_string(),
    };

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        create_booking(State(Arc::clone(&state)), Json(request)),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(
        state.board.read().await.slot(&slot_id(9, 0)).unwrap().status,
        SlotStatus::Pending
    );

    tokio::time::sleep(Duration::from_millis(500)).await;

    let board = state.board.read().await;
    let slot = board.slot(&slot_id(9, 0)).unwrap();
    assert_eq!(slot.status, SlotStatus::Booked);
    assert_eq!(slot.candidate_id.as_deref(), Some("c1"));
}
