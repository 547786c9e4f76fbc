//! Domain layer for mog-agent
//!
//! This crate contains the conversational agent's core state and pure logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] owns the append-only message log (seeded with one welcome
//! message), the current [`Mode`], an optional staged [`ImageData`] attachment
//! and the [`ExchangeState`] (`Idle` / `Exchanging`).
//!
//! ## Exchange
//!
//! One submit → request → response → append cycle:
//!
//! ```text
//! Session ──build──▶ ExchangeRequest ──adapter──▶ ExchangeResponse ──interpret──▶ Vec<MessageContent>
//! ```
//!
//! - [`RequestBuilder`] picks the chat or image-generation payload shape
//! - [`interpret`] turns a provider response into agent messages

pub mod core;
pub mod exchange;
pub mod media;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use core::error::DomainError;
pub use exchange::{
    interpreter::{InterpretError, interpret, interpret_chat_reply, interpret_generated_parts},
    request::{
        ChatRequest, DEFAULT_HISTORY_WINDOW, ExchangeRequest, ImageRequest, RequestBuilder, Turn,
    },
    response::{ContentPart, ExchangeResponse},
};
pub use media::ImageData;
pub use session::{
    entities::{Message, MessageContent, MessageId, MessageKind, Role},
    mode::Mode,
    state::{ExchangeState, Session, SessionError},
};
