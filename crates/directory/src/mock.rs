use async_trait::async_trait;
use mockall::mock;
use slotbook_core::models::{
    booking::{BookingAck, BookingRequest},
    person::{Candidate, Engineer},
};

// Mock directory for testing
mock! {
    pub Directory {}

    #[async_trait]
    impl crate::Directory for Directory {
        async fn fetch_candidates(&self) -> eyre::Result<Vec<Candidate>>;

        async fn fetch_engineers(&self) -> eyre::Result<Vec<Engineer>>;

        async fn confirm_booking(&self, request: &BookingRequest) -> eyre::Result<BookingAck>;
    }
}
