//! # Booking Handlers
//!
//! Booking happens in two steps around the remote confirmation. The slot is
//! marked pending under the board lock, the lock is released while the
//! directory confirms, and the lock is taken again to either finalise the
//! booking or put the slot back. The second half runs on a spawned task and
//! completes even if the client disconnects.

use std::sync::Arc;

use axum::{Json, extract::State};
use slotbook_core::models::booking::{BookingRequest, BookingResponse};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Books a slot for a candidate.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// {"slotId": "e1-1748854800000", "candidateId": "c1", "engineerId": "e1"}
/// ```
///
/// # Errors
///
/// * `SlotError::NotFound` - unknown slot, candidate or engineer
/// * `SlotError::Validation` - the engineer does not own the slot
/// * `SlotError::Conflict` - the slot is pending or booked already
/// * `SlotError::Remote` - the directory refused or failed; the slot is available again
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let response = state.book(payload).await?;

    info!(
        slot_id = %response.slot.id,
        confirmation_id = %response.ack.confirmation_id,
        "Booking completed"
    );

    Ok(Json(response))
}
