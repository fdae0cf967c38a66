//! # SlotBook Directory
//!
//! Access to the people behind the slots: candidates, engineers and the
//! service that confirms bookings.
//!
//! [`Directory`] is the seam the API crate depends on. Two implementations
//! ship here:
//!
//! - [`http::HttpDirectory`] talks to a remote JSON directory
//! - [`file::FileDirectory`] reads JSON documents from a local data directory
//!   and acknowledges bookings after a fixed delay
//!
//! [`mock::MockDirectory`] is generated with mockall for tests.

pub mod file;
pub mod http;
pub mod mock;

use async_trait::async_trait;
use eyre::Result;
use slotbook_core::models::{
    booking::{BookingAck, BookingRequest},
    person::{Candidate, Engineer},
};
use tracing::info;

#[async_trait]
pub trait Directory: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>>;

    async fn fetch_engineers(&self) -> Result<Vec<Engineer>>;

    /// Asks the remote side to confirm a booking. An error means the booking
    /// did not happen.
    async fn confirm_booking(&self, request: &BookingRequest) -> Result<BookingAck>;
}

/// Fetches candidates and engineers concurrently and waits for both.
///
/// Fails as soon as either fetch fails.
pub async fn load_all(directory: &dyn Directory) -> Result<(Vec<Candidate>, Vec<Engineer>)> {
    let (candidates, engineers) =
        tokio::try_join!(directory.fetch_candidates(), directory.fetch_engineers())?;

    info!(
        candidates = candidates.len(),
        engineers = engineers.len(),
        "Directory loaded"
    );

    Ok((candidates, engineers))
}
