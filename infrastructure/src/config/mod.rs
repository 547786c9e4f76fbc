//! Configuration file loading for mog-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./mog-agent.toml` or `./.mog-agent.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/mog-agent/config.toml`
//! 4. Default values

mod file_config;
mod loader;
pub mod validation;

pub use file_config::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, FileAgentConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
