//! # Slot Handlers
//!
//! The filtered slot list and the selection that precedes a booking.
//!
//! The list is derived state of the shared board: changing the view through
//! [`update_view`] recomputes it once, and [`get_slots`] only reads the
//! result.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slotbook_core::{
    board::SlotBoard,
    errors::SlotResult,
    grouper::BlockDuration,
    models::booking::{Selection, SlotsResponse, UpdateViewRequest},
};
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

fn slots_response(board: &SlotBoard) -> SlotResult<SlotsResponse> {
    Ok(SlotsResponse {
        filter: board.filter().clone(),
        duration: board.duration(),
        slots: board.visible_slots()?.to_vec(),
    })
}

/// Returns the slots matching the active filter and duration.
///
/// # Endpoint
///
/// ```text
/// GET /api/slots
/// ```
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SlotsResponse>, AppError> {
    let board = state.board.read().await;
    Ok(Json(slots_response(&board)?))
}

/// Changes the person filter and/or the duration and returns the new list.
///
/// # Endpoint
///
/// ```text
/// PUT /api/view
/// {"filter": {"filterType": "candidate", "filterId": "c1"}, "duration": 30}
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - duration is not a positive multiple of 15
/// * `SlotError::NotReady` / `SlotError::LoadFailed` - no data to show
#[axum::debug_handler]
pub async fn update_view(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateViewRequest>,
) -> Result<Json<SlotsResponse>, AppError> {
    let mut board = state.board.write().await;

    let duration = match payload.duration {
        Some(minutes) => BlockDuration::new(minutes)?,
        None => board.duration(),
    };

    if board.set_view(payload.filter, duration) {
        debug!(filter = ?board.filter(), %duration, "View changed");
    }

    Ok(Json(slots_response(&board)?))
}

/// Selects a slot and returns the pre-filled booking form.
///
/// Slots that are already pending or booked are refused with `409`.
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/:id/select
/// ```
#[axum::debug_handler]
pub async fn select_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Selection>, AppError> {
    let selection = state.board.write().await.select_slot(&id)?;
    Ok(Json(selection))
}

/// Returns the current selection, if any.
pub async fn get_selection(State(state): State<Arc<ApiState>>) -> Json<Option<Selection>> {
    Json(state.board.read().await.selection().cloned())
}

/// Clears the current selection.
pub async fn clear_selection(State(state): State<Arc<ApiState>>) -> StatusCode {
    state.board.write().await.clear_selection();
    StatusCode::NO_CONTENT
}
