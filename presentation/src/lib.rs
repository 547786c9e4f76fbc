//! Presentation layer for mog-agent
//!
//! This crate contains CLI definitions, console rendering,
//! the loading indicator, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, ModeArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::printer::ReplyPrinter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
