//! Interactive chat module
//!
//! Provides a readline-based interactive interface to the Mog Agent.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
