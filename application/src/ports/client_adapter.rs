//! Client Adapter port
//!
//! Defines the interface for the hosted LLM capability. The controller is
//! handed an adapter explicitly (or none, when no credential is available);
//! there is no global client.

use async_trait::async_trait;
use mog_domain::{ContentPart, Turn};
use thiserror::Error;

/// Errors that can occur during adapter calls
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl AdapterError {
    /// Quota exhaustion or provider overload; the user may resubmit later.
    pub fn is_transient(&self) -> bool {
        match self {
            AdapterError::HttpStatus { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504)
            }
            AdapterError::ConnectionError(_) | AdapterError::Timeout => true,
            _ => false,
        }
    }
}

/// Gateway to the hosted LLM
///
/// Implementations live in the infrastructure layer. Both operations fail by
/// returning an error on transport, quota or malformed-response problems.
#[async_trait]
pub trait ClientAdapter: Send + Sync {
    /// Conversational exchange: persona, prior turns (oldest first) and the
    /// triggering message. Returns the reply text, or `None` when the
    /// provider produced no text.
    async fn conversational_exchange(
        &self,
        persona: &str,
        history: &[Turn],
        message: &str,
    ) -> Result<Option<String>, AdapterError>;

    /// Multimodal generation over ordered parts; returns ordered parts.
    async fn multimodal_generate(
        &self,
        parts: &[ContentPart],
    ) -> Result<Vec<ContentPart>, AdapterError>;
}
