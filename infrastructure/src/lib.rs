//! Infrastructure layer for mog-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini client, transcript logging,
//! configuration file loading, credential discovery and attachment ingestion.

pub mod attachment;
pub mod config;
pub mod credential;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use attachment::{AttachmentError, FsAttachmentSource, load_attachment, media_type_for};
pub use config::{
    ConfigIssue, ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, Severity,
};
pub use credential::{ApiKey, CredentialSource, resolve_api_key};
pub use gemini::GeminiClientAdapter;
pub use logging::JsonlConversationLogger;
