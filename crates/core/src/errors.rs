use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data not loaded yet: {0}")]
    NotReady(String),

    #[error("Data load failed: {0}")]
    LoadFailed(String),

    #[error("Remote error: {0}")]
    Remote(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SlotResult<T> = Result<T, SlotError>;
