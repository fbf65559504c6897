use thiserror::Error;

/// Error type that captures scheduling and configuration failures.
#[derive(Debug, Error)]
pub enum ZeptoError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
