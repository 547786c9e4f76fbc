//! [`ClientAdapter`] over the Gemini REST API.

use super::types::{ErrorWrapper, GenerateContentRequest, GenerateContentResponse};
use crate::config::{DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use async_trait::async_trait;
use mog_application::{AdapterError, ClientAdapter};
use mog_domain::{ContentPart, Turn};
use reqwest::{Client, StatusCode};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed adapter.
///
/// The key travels in a request header rather than the query string, so
/// transport errors (which embed the URL) never carry it.
#[derive(Clone)]
pub struct GeminiClientAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl GeminiClientAdapter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn send(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AdapterError> {
        debug!(model, contents = body.contents.len(), "Sending generateContent");

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AdapterError::MalformedResponse(e.without_url().to_string()))
    }
}

#[async_trait]
impl ClientAdapter for GeminiClientAdapter {
    async fn conversational_exchange(
        &self,
        persona: &str,
        history: &[Turn],
        message: &str,
    ) -> Result<Option<String>, AdapterError> {
        let request = GenerateContentRequest::conversation(persona, history, message);
        let response = self.send(&self.chat_model, &request).await?;
        Ok(response.into_text())
    }

    async fn multimodal_generate(
        &self,
        parts: &[ContentPart],
    ) -> Result<Vec<ContentPart>, AdapterError> {
        let request = GenerateContentRequest::generation(parts);
        let response = self.send(&self.image_model, &request).await?;
        response
            .into_parts()
            .map_err(|e| AdapterError::MalformedResponse(e.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> AdapterError {
    let err = err.without_url();
    if err.is_timeout() {
        AdapterError::Timeout
    } else if err.is_connect() {
        AdapterError::ConnectionError(err.to_string())
    } else {
        AdapterError::Other(format!("Gemini API request failed: {err}"))
    }
}

fn map_http_error(status: StatusCode, body: &str) -> AdapterError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    AdapterError::HttpStatus {
        status: status.as_u16(),
        message,
    }
}
