use std::sync::Arc;

use axum::{Json, extract::State};
use slotbook_core::models::{
    booking::StatusResponse,
    person::{Candidate, Engineer},
};

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn get_status(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    Json(state.board.read().await.status())
}

/// Re-runs the initial load and reports the resulting status.
#[axum::debug_handler]
pub async fn reload(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    state.reload().await;
    Json(state.board.read().await.status())
}

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let board = state.board.read().await;
    Ok(Json(board.candidates()?.to_vec()))
}

#[axum::debug_handler]
pub async fn list_engineers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Engineer>>, AppError> {
    let board = state.board.read().await;
    Ok(Json(board.engineers()?.to_vec()))
}
