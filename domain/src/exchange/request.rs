//! Request building.
//!
//! Two mutually exclusive payload shapes, selected by [`Mode`]:
//!
//! - [`ChatRequest`]: persona + recent text turns + the triggering message.
//!   It has no field that can carry an image.
//! - [`ImageRequest`]: an ordered part list whose first part is always text,
//!   followed by the staged image when there is one.
//!
//! The builder reads the log as it was *before* the user's message is
//! appended, so the new text is never duplicated into the history.

use super::response::ContentPart;
use crate::media::ImageData;
use crate::prompt::{DEFAULT_IMAGE_PROMPT, PERSONA, user_display_text};
use crate::session::entities::{Message, MessageContent, Role};
use crate::session::mode::Mode;
use crate::session::state::Session;

/// Number of most recent turns sent with a chat request.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// One role-attributed text unit of outbound chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Payload for a conversational exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// System instruction, sent once outside the turn history.
    pub persona: String,
    /// Oldest first, at most the configured window.
    pub history: Vec<Turn>,
    /// The user's new text.
    pub message: String,
}

/// Payload for a multimodal generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    prompt: String,
    image: Option<ImageData>,
}

impl ImageRequest {
    /// Empty `text` falls back to [`DEFAULT_IMAGE_PROMPT`].
    pub fn new(text: &str, image: Option<ImageData>) -> Self {
        let prompt = if text.trim().is_empty() {
            DEFAULT_IMAGE_PROMPT.to_string()
        } else {
            text.to_string()
        };
        Self { prompt, image }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Text part first, then the inline image if one is staged.
    pub fn parts(&self) -> Vec<ContentPart> {
        let mut parts = vec![ContentPart::Text(self.prompt.clone())];
        if let Some(image) = &self.image {
            parts.push(ContentPart::Image(image.clone()));
        }
        parts
    }
}

/// A built request, tagged by the path it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRequest {
    Chat(ChatRequest),
    Image(ImageRequest),
}

impl ExchangeRequest {
    pub fn mode(&self) -> Mode {
        match self {
            ExchangeRequest::Chat(_) => Mode::Chat,
            ExchangeRequest::Image(_) => Mode::ImageGeneration,
        }
    }
}

/// Converts session state + new input into an [`ExchangeRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    history_window: usize,
    persona: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            persona: PERSONA.to_string(),
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Builder Methods ====================

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Build from a session whose new user message has not been appended yet.
    pub fn build_for(&self, session: &Session, text: &str) -> ExchangeRequest {
        self.build(
            session.mode(),
            session.messages(),
            text,
            session.attachment(),
        )
    }

    pub fn build(
        &self,
        mode: Mode,
        log: &[Message],
        text: &str,
        attachment: Option<&ImageData>,
    ) -> ExchangeRequest {
        match mode {
            Mode::Chat => ExchangeRequest::Chat(self.chat_request(log, text, attachment)),
            Mode::ImageGeneration => {
                ExchangeRequest::Image(ImageRequest::new(text, attachment.cloned()))
            }
        }
    }

    /// Text-kind, non-welcome messages as turns, truncated to the most
    /// recent `history_window`. Older context is dropped without summary.
    pub fn chat_history(&self, log: &[Message]) -> Vec<Turn> {
        let turns: Vec<Turn> = log
            .iter()
            .filter(|m| !m.is_welcome())
            .filter_map(|m| match m.content() {
                MessageContent::Text(text) => Some(Turn::new(m.role(), text.clone())),
                MessageContent::Image(_) => None,
            })
            .collect();
        let skip = turns.len().saturating_sub(self.history_window);
        turns.into_iter().skip(skip).collect()
    }

    fn chat_request(
        &self,
        log: &[Message],
        text: &str,
        attachment: Option<&ImageData>,
    ) -> ChatRequest {
        // Attachment-only submissions in chat mode still need a message body.
        let message = if text.trim().is_empty() {
            user_display_text(text, attachment.is_some())
        } else {
            text.to_string()
        };
        ChatRequest {
            persona: self.persona.clone(),
            history: self.chat_history(log),
            message,
        }
    }
}
