use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{filter::PersonFilter, grouper::BlockDuration, models::slot::Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub slot_id: String,
    pub candidate_id: String,
    pub engineer_id: String,
}

/// Acknowledgement returned by the directory once a booking is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAck {
    pub confirmation_id: Uuid,
    pub slot_id: String,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingAck {
    pub fn new(slot_id: impl Into<String>) -> Self {
        Self {
            confirmation_id: Uuid::new_v4(),
            slot_id: slot_id.into(),
            confirmed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub slot: Slot,
    pub ack: BookingAck,
}

/// The slot a user picked, with the booking form pre-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub slot: Slot,
    pub initial_candidate_id: Option<String>,
    pub initial_engineer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewRequest {
    #[serde(default)]
    pub filter: PersonFilter,
    /// Meeting length in minutes; the current one is kept when absent.
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub filter: PersonFilter,
    pub duration: BlockDuration,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub slot_count: usize,
}
