//! Image payloads and their self-describing data reference form.
//!
//! Attachments arrive either as files or as a
//! `data:<media-type>;base64,<payload>` reference. Both end up as
//! [`ImageData`], and agent images are stored the same way so the log never
//! depends on external storage.

use crate::core::error::DomainError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::fmt;

/// Raw image bytes tagged with an explicit media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    media_type: String,
    bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::EmptyImage);
        }
        Ok(Self {
            media_type: media_type.into(),
            bytes,
        })
    }

    /// Decode a base64 payload (as returned inline by providers).
    pub fn from_base64(media_type: impl Into<String>, data: &str) -> Result<Self, DomainError> {
        let bytes = BASE64_STANDARD
            .decode(data.trim())
            .map_err(|e| DomainError::InvalidBase64(e.to_string()))?;
        Self::new(media_type, bytes)
    }

    /// Parse a `data:<media-type>;base64,<payload>` reference.
    pub fn from_data_url(url: &str) -> Result<Self, DomainError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| DomainError::NotADataUrl(crate::core::string::truncate(url, 32)))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DomainError::NotADataUrl(crate::core::string::truncate(url, 32)))?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or(DomainError::NotBase64Encoded)?;
        let media_type = if media_type.is_empty() {
            "application/octet-stream"
        } else {
            media_type
        };
        Self::from_base64(media_type, payload)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 payload without the data URL header.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }
}

// Payloads can be megabytes; keep Debug output readable.
impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
