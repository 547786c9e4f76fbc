//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not a data URL: {0}")]
    NotADataUrl(String),

    #[error("Data URL is not base64 encoded")]
    NotBase64Encoded,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("Image payload is empty")]
    EmptyImage,
}
