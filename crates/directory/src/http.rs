use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use serde::de::DeserializeOwned;
use slotbook_core::models::{
    booking::{BookingAck, BookingRequest},
    person::{Candidate, Engineer},
};
use tracing::debug;

use crate::Directory;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Directory backed by a remote HTTP service.
///
/// Every request is bounded by the client timeout, so a stalled directory
/// fails the call instead of hanging it. Expects `GET {base}/candidates.json`, `GET {base}/engineers.json` and
/// `POST {base}/bookings/{slot_id}` answering with a [`BookingAck`].
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build directory HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "Fetching directory document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err_with(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            return Err(eyre!("Failed to load {}: status {}", path, response.status()));
        }

        response
            .json()
            .await
            .wrap_err_with(|| format!("Invalid JSON in {}", path))
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        self.get_json("candidates.json").await
    }

    async fn fetch_engineers(&self) -> Result<Vec<Engineer>> {
        self.get_json("engineers.json").await
    }

    async fn confirm_booking(&self, request: &BookingRequest) -> Result<BookingAck> {
        let url = self.url(&format!("bookings/{}", urlencoding::encode(&request.slot_id)));

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .wrap_err_with(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!(
                "Failed to confirm booking {}: status {} {}",
                request.slot_id,
                status,
                error_text
            ));
        }

        let ack: BookingAck = response.json().await?;
        Ok(ack)
    }
}
