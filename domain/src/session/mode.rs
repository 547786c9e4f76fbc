//! Session mode: runtime-mutable payload selection.
//!
//! [`Mode`] decides which [`RequestBuilder`](crate::exchange::request::RequestBuilder)
//! path the next submission takes. Switching never touches the log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which conversation capability subsequent submissions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Text dialogue with persona and recent history.
    #[default]
    Chat,
    /// Multimodal generation from a prompt and an optional image.
    ImageGeneration,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::ImageGeneration => "image-generation",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "image" | "image-generation" | "image_generation" | "visuals" => {
                Ok(Mode::ImageGeneration)
            }
            other => Err(format!(
                "unknown mode '{}' (expected 'chat' or 'image-generation')",
                other
            )),
        }
    }
}
