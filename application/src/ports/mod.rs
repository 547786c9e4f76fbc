//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters must implement.

pub mod attachment_source;
pub mod client_adapter;
pub mod conversation_logger;
pub mod progress;
