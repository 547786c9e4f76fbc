//! Application layer for mog-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExchangeParams;
pub use ports::{
    attachment_source::{AttachmentLoadError, AttachmentSource},
    client_adapter::{AdapterError, ClientAdapter},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{ExchangeProgress, NoProgress},
};
pub use use_cases::agent_controller::{AgentController, SessionSnapshot, SubmitOutcome};
pub use use_cases::run_exchange::{ExchangeError, ExchangeRunner};
