//! Exchange parameters: use case control.
//!
//! [`ExchangeParams`] groups the static parameters that control how the
//! [`AgentController`](crate::use_cases::agent_controller::AgentController)
//! builds requests and bounds adapter calls.

use mog_domain::{DEFAULT_HISTORY_WINDOW, Mode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exchange control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeParams {
    /// Most recent text turns sent with a chat request.
    pub history_window: usize,
    /// Upper bound for a single adapter call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Mode a new session starts in.
    pub initial_mode: Mode,
}

impl Default for ExchangeParams {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            timeout: Some(Duration::from_secs(60)),
            initial_mode: Mode::Chat,
        }
    }
}

impl ExchangeParams {
    // ==================== Builder Methods ====================

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }
}
