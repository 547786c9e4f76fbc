//! Provider result types.
//!
//! Multimodal providers return a list of heterogeneous parts. Adapters decode
//! each raw part into one or more [`ContentPart`] variants at the boundary so
//! nothing downstream probes optional fields.

use crate::media::ImageData;

/// A single part of a multimodal payload, outbound or inbound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(ImageData),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(s) => Some(s),
            ContentPart::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            ContentPart::Image(image) => Some(image),
            ContentPart::Text(_) => None,
        }
    }
}

/// What a client adapter returned for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeResponse {
    /// Scalar text of a conversational exchange (`None` when the provider
    /// returned no text at all).
    Chat(Option<String>),
    /// Ordered parts of a multimodal generation.
    Generation(Vec<ContentPart>),
}
