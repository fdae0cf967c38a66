use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` during which a person is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Whether `[start, end)` lies entirely inside this window.
    pub fn contains(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub timezone: String,
    /// Display color used when rendering this engineer's free slots.
    pub color: String,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

impl Engineer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
