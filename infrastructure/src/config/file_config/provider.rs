//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Gemini API provider configuration.
///
/// # Example
///
/// ```toml
/// [provider]
/// api_key_env = "API_KEY"
/// chat_model = "gemini-3-flash-preview"
/// image_model = "gemini-2.5-flash-image"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key (default: "API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env` so the key stays out of the file).
    pub api_key: Option<String>,
    /// Base URL for the Gemini REST API.
    pub base_url: String,
    /// Model used for conversational exchanges.
    pub chat_model: String,
    /// Model used for multimodal generation.
    pub image_model: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}
