//! Agent configuration from TOML (`[agent]` section)

use crate::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use mog_application::ExchangeParams;
use mog_domain::{DEFAULT_HISTORY_WINDOW, Mode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// history_window = 10            # most recent turns sent with chat requests
/// exchange_timeout_secs = 60     # 0 disables the timeout
/// initial_mode = "chat"          # "chat" or "image-generation"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub history_window: usize,
    pub exchange_timeout_secs: u64,
    pub initial_mode: String,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            exchange_timeout_secs: 60,
            initial_mode: "chat".to_string(),
        }
    }
}

impl FileAgentConfig {
    /// Parse initial_mode into [`Mode`], returning warnings on failure.
    pub fn parse_initial_mode(&self) -> (Mode, Vec<ConfigIssue>) {
        match self.initial_mode.parse::<Mode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "agent.initial_mode".to_string(),
                        value: self.initial_mode.clone(),
                        valid_values: vec!["chat".to_string(), "image-generation".to_string()],
                    },
                    message: format!(
                        "agent.initial_mode: unknown value '{}', falling back to 'chat'",
                        self.initial_mode
                    ),
                };
                (Mode::default(), vec![issue])
            }
        }
    }

    /// A zero window would send no context at all; treated as a mistake.
    pub fn parse_history_window(&self) -> (usize, Vec<ConfigIssue>) {
        if self.history_window > 0 {
            return (self.history_window, vec![]);
        }
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::ZeroValue {
                field: "agent.history_window".to_string(),
            },
            message: format!(
                "agent.history_window: 0 is not allowed, falling back to {}",
                DEFAULT_HISTORY_WINDOW
            ),
        };
        (DEFAULT_HISTORY_WINDOW, vec![issue])
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.exchange_timeout_secs > 0).then(|| Duration::from_secs(self.exchange_timeout_secs))
    }

    /// Convert into application parameters, applying fallbacks.
    pub fn to_exchange_params(&self) -> ExchangeParams {
        ExchangeParams::default()
            .with_history_window(self.parse_history_window().0)
            .with_timeout(self.timeout())
            .with_initial_mode(self.parse_initial_mode().0)
    }
}
