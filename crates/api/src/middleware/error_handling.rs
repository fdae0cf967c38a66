//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotbook_core::errors::SlotError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps [`SlotError`] and implements `IntoResponse`, producing a
/// body of the form `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Conflict(_) => StatusCode::CONFLICT,
            SlotError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            SlotError::LoadFailed(_) => StatusCode::BAD_GATEWAY,
            SlotError::Remote(_) => StatusCode::BAD_GATEWAY,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}
