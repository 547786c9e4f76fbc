//! Session state store.
//!
//! [`Session`] owns the message log, the current [`Mode`], the staged
//! attachment and the [`ExchangeState`]. All mutation goes through the
//! transition methods below so the log only ever receives whole exchanges:
//!
//! ```text
//!        append_user_message + start_exchange
//! Idle ───────────────────────────────────────▶ Exchanging
//!   ▲                                               │
//!   └──── complete_exchange(replies) / fail_exchange ┘
//! ```

use super::entities::{Message, MessageContent, MessageId, Role};
use super::mode::Mode;
use crate::media::ImageData;
use crate::prompt::{FAILURE_FALLBACK, WELCOME_MESSAGE, user_display_text};
use thiserror::Error;

/// Exchange lifecycle of a session. There is no streaming intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    Exchanging,
}

/// Reasons a session operation was refused. None of these touch the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Nothing to submit: text is empty and no image is attached")]
    EmptyInput,

    #[error("An exchange is already in flight")]
    Busy,

    #[error("No exchange is in flight")]
    NotExchanging,
}

/// Represents one agent conversation (Entity)
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    next_id: MessageId,
    mode: Mode,
    attachment: Option<ImageData>,
    state: ExchangeState,
    last_failure: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_mode(Mode::default())
    }

    /// Create a session seeded with the welcome message.
    pub fn with_mode(mode: Mode) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            next_id: MessageId::WELCOME,
            mode,
            attachment: None,
            state: ExchangeState::Idle,
            last_failure: None,
        };
        session.push(Role::Agent, MessageContent::text(WELCOME_MESSAGE));
        session
    }

    // ==================== Accessors ====================

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn attachment(&self) -> Option<&ImageData> {
        self.attachment.as_ref()
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == ExchangeState::Exchanging
    }

    /// Reason recorded by the most recent [`fail_exchange`](Self::fail_exchange).
    /// Kept for diagnostics only; it never appears in the log.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    // ==================== Transitions ====================

    /// Check the submit guard without mutating anything.
    pub fn check_submit(&self, text: &str) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        if text.trim().is_empty() && self.attachment.is_none() {
            return Err(SessionError::EmptyInput);
        }
        Ok(())
    }

    /// Append the user's submission as a text message.
    ///
    /// Rejected when already loading, or when both `text` and `attachment`
    /// are empty. With an attachment the displayed text is annotated (see
    /// [`user_display_text`]).
    pub fn append_user_message(
        &mut self,
        text: &str,
        attachment: Option<&ImageData>,
    ) -> Result<&Message, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        if text.trim().is_empty() && attachment.is_none() {
            return Err(SessionError::EmptyInput);
        }
        let display = user_display_text(text, attachment.is_some());
        Ok(self.push(Role::User, MessageContent::Text(display)))
    }

    /// Idle → Exchanging.
    pub fn start_exchange(&mut self) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.state = ExchangeState::Exchanging;
        Ok(())
    }

    /// Append every reply in order as agent messages, then clear the
    /// attachment and return to Idle. Returns the appended messages.
    pub fn complete_exchange(
        &mut self,
        replies: Vec<MessageContent>,
    ) -> Result<&[Message], SessionError> {
        if !self.is_loading() {
            return Err(SessionError::NotExchanging);
        }
        let start = self.messages.len();
        for reply in replies {
            self.push(Role::Agent, reply);
        }
        self.finish();
        Ok(&self.messages[start..])
    }

    /// Append exactly one fallback agent message, then clear the attachment
    /// and return to Idle.
    pub fn fail_exchange(&mut self, reason: impl Into<String>) -> Result<&Message, SessionError> {
        if !self.is_loading() {
            return Err(SessionError::NotExchanging);
        }
        self.last_failure = Some(reason.into());
        self.finish();
        Ok(self.push(Role::Agent, MessageContent::text(FAILURE_FALLBACK)))
    }

    /// Pure state change; history is kept.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Stage an image for the next exchange and switch to image generation.
    ///
    /// Replaces any previously staged image. Refused while exchanging: the
    /// in-flight exchange owns the attachment until it clears it.
    pub fn stage_attachment(&mut self, image: ImageData) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.attachment = Some(image);
        self.mode = Mode::ImageGeneration;
        Ok(())
    }

    /// Drop the staged image, if any. Refused while exchanging.
    pub fn clear_attachment(&mut self) -> Result<Option<ImageData>, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        Ok(self.attachment.take())
    }

    fn finish(&mut self) {
        self.attachment = None;
        self.state = ExchangeState::Idle;
    }

    fn push(&mut self, role: Role, content: MessageContent) -> &Message {
        let id = self.next_id;
        self.next_id = id.next();
        self.messages.push(Message::new(id, role, content));
        &self.messages[self.messages.len() - 1]
    }
}
