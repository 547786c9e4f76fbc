//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion into application parameters happens in the per-section
//! modules, with fallbacks reported through [`FileConfig::validate`].

mod agent;
mod output;
mod provider;

pub use agent::FileAgentConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use provider::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, FileProviderConfig};

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini API settings
    pub provider: FileProviderConfig,
    /// Exchange behavior
    pub agent: FileAgentConfig,
    /// Terminal output
    pub output: FileOutputConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.agent.parse_history_window().1);
        issues.extend(self.agent.parse_initial_mode().1);

        if self.provider.chat_model.trim().is_empty() {
            issues.push(ConfigIssue::empty("provider.chat_model", DEFAULT_CHAT_MODEL));
        }
        if self.provider.image_model.trim().is_empty() {
            issues.push(ConfigIssue::empty("provider.image_model", DEFAULT_IMAGE_MODEL));
        }
        if self.provider.base_url.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyValue {
                    field: "provider.base_url".to_string(),
                },
                message: format!(
                    "provider.base_url: empty value, falling back to '{}'",
                    DEFAULT_BASE_URL
                ),
            });
        }

        issues
    }

    /// Chat model with the empty-name fallback applied.
    pub fn chat_model(&self) -> &str {
        non_empty_or(&self.provider.chat_model, DEFAULT_CHAT_MODEL)
    }

    /// Image model with the empty-name fallback applied.
    pub fn image_model(&self) -> &str {
        non_empty_or(&self.provider.image_model, DEFAULT_IMAGE_MODEL)
    }

    /// Base URL with the empty fallback applied.
    pub fn base_url(&self) -> &str {
        non_empty_or(&self.provider.base_url, DEFAULT_BASE_URL)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
