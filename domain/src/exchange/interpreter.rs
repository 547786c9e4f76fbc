//! Response interpretation.
//!
//! Turns an [`ExchangeResponse`] into the agent messages to append:
//!
//! - chat: always exactly one text message; empty/missing text becomes
//!   [`EMPTY_REPLY_FALLBACK`]
//! - generation: one message per usable part, in the order returned; a
//!   response with nothing usable is an error, never a silent no-op

use super::response::{ContentPart, ExchangeResponse};
use crate::prompt::EMPTY_REPLY_FALLBACK;
use crate::session::entities::MessageContent;
use thiserror::Error;

/// The response could not be turned into log entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    #[error("Generation returned no parts")]
    NoParts,

    #[error("Generation returned {0} part(s) with neither image nor text content")]
    NoUsableContent(usize),
}

/// Interpret any response into agent message contents.
pub fn interpret(response: ExchangeResponse) -> Result<Vec<MessageContent>, InterpretError> {
    match response {
        ExchangeResponse::Chat(text) => Ok(vec![interpret_chat_reply(text)]),
        ExchangeResponse::Generation(parts) => interpret_generated_parts(parts),
    }
}

pub fn interpret_chat_reply(text: Option<String>) -> MessageContent {
    match text {
        Some(text) if !text.trim().is_empty() => MessageContent::Text(text),
        _ => MessageContent::text(EMPTY_REPLY_FALLBACK),
    }
}

pub fn interpret_generated_parts(
    parts: Vec<ContentPart>,
) -> Result<Vec<MessageContent>, InterpretError> {
    if parts.is_empty() {
        return Err(InterpretError::NoParts);
    }
    let total = parts.len();
    let messages: Vec<MessageContent> = parts
        .into_iter()
        .filter_map(|part| match part {
            ContentPart::Image(image) => Some(MessageContent::Image(image)),
            ContentPart::Text(text) if !text.trim().is_empty() => Some(MessageContent::Text(text)),
            ContentPart::Text(_) => None,
        })
        .collect();
    if messages.is_empty() {
        return Err(InterpretError::NoUsableContent(total));
    }
    Ok(messages)
}
