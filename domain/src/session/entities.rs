//! Session domain entities

use crate::media::ImageData;
use std::fmt;

/// Monotonic message identifier. Defines log order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Identifier of the synthetic welcome message every session starts with.
    pub const WELCOME: MessageId = MessageId(0);

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }
}

/// Message kind, derived from its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
}

/// Body of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Image(ImageData),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            MessageContent::Text(_) => MessageKind::Text,
            MessageContent::Image(_) => MessageKind::Image,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            MessageContent::Image(image) => Some(image),
            MessageContent::Text(_) => None,
        }
    }
}

/// A message in the session log (Entity)
///
/// Created only by [`Session`](super::state::Session), which assigns the id;
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: MessageContent,
}

impl Message {
    pub(crate) fn new(id: MessageId, role: Role, content: MessageContent) -> Self {
        Self { id, role, content }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn kind(&self) -> MessageKind {
        self.content.kind()
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn is_welcome(&self) -> bool {
        self.id == MessageId::WELCOME
    }
}
