use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use serde::de::DeserializeOwned;
use slotbook_core::models::{
    booking::{BookingAck, BookingRequest},
    person::{Candidate, Engineer},
};
use tracing::{debug, info};

use crate::Directory;

/// Latency of the simulated booking confirmation.
pub const DEFAULT_CONFIRM_LATENCY: Duration = Duration::from_millis(500);

/// Directory read from `candidates.json` and `engineers.json` in a local
/// data directory.
///
/// Bookings are acknowledged after [`FileDirectory::confirm_latency`] and
/// never fail.
#[derive(Debug, Clone)]
pub struct FileDirectory {
    root: PathBuf,
    confirm_latency: Duration,
}

impl FileDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            confirm_latency: DEFAULT_CONFIRM_LATENCY,
        }
    }

    pub fn with_confirm_latency(mut self, latency: Duration) -> Self {
        self.confirm_latency = latency;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn confirm_latency(&self) -> Duration {
        self.confirm_latency
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        debug!(path = %path.display(), "Reading directory document");

        let raw = tokio::fs::read_to_string(&path)
            .await
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&raw).wrap_err_with(|| format!("Invalid JSON in {}", path.display()))
    }
}

#[async_trait]
impl Directory for FileDirectory {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        self.read_json("candidates.json").await
    }

    async fn fetch_engineers(&self) -> Result<Vec<Engineer>> {
        self.read_json("engineers.json").await
    }

    async fn confirm_booking(&self, request: &BookingRequest) -> Result<BookingAck> {
        tokio::time::sleep(self.confirm_latency).await;

        info!(
            slot_id = %request.slot_id,
            candidate_id = %request.candidate_id,
            engineer_id = %request.engineer_id,
            "Booking acknowledged"
        );

        Ok(BookingAck::new(request.slot_id.clone()))
    }
}
