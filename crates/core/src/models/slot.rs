use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of every generated slot, in minutes.
pub const SLOT_MINUTES: i64 = 15;

/// Color applied to a slot once it is taken.
pub const BOOKED_COLOR: &str = "#6B7280";

pub const BOOKED_TITLE: &str = "Booked";

pub fn slot_length() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    /// Booked locally, waiting for the directory to acknowledge.
    Pending,
    Booked,
}

/// A bookable 15-minute unit of one engineer's time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub title: String,
    pub engineer_id: String,
    pub color: String,
    pub status: SlotStatus,
    pub candidate_id: Option<String>,
}

impl Slot {
    /// Stable identifier: the engineer id and the start time in epoch millis.
    pub fn make_id(engineer_id: &str, start: DateTime<Utc>) -> String {
        format!("{}-{}", engineer_id, start.timestamp_millis())
    }

    pub fn free_title(engineer_name: &str) -> String {
        format!("{} - Free", engineer_name)
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}
