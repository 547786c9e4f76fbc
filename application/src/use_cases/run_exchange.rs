//! Run Exchange use case.
//!
//! Sends one built [`ExchangeRequest`] through the [`ClientAdapter`] and
//! interprets the result. Every failure mode (missing credential, adapter
//! error, timeout, unusable response) comes back as a single
//! [`ExchangeError`]; the caller turns that into exactly one fallback
//! message. There is no automatic retry.

use crate::ports::client_adapter::{AdapterError, ClientAdapter};
use mog_domain::{
    ExchangeRequest, ExchangeResponse, InterpretError, MessageContent, interpret,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that end an exchange with the fallback message.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("No client adapter available (missing credential)")]
    MissingCredential,

    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Adapter call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unusable response: {0}")]
    Interpret(#[from] InterpretError),
}

impl ExchangeError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ExchangeError::MissingCredential)
    }

    /// Resubmitting the same input later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ExchangeError::Adapter(e) => e.is_transient(),
            ExchangeError::Timeout(_) => true,
            ExchangeError::MissingCredential | ExchangeError::Interpret(_) => false,
        }
    }
}

/// Bounds adapter calls and interprets their results.
#[derive(Clone)]
pub struct ExchangeRunner {
    adapter: Option<Arc<dyn ClientAdapter>>,
    timeout: Option<Duration>,
}

impl ExchangeRunner {
    /// `adapter` is `None` when it could not be constructed; every run then
    /// short-circuits without any network call.
    pub fn new(adapter: Option<Arc<dyn ClientAdapter>>) -> Self {
        Self {
            adapter,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }

    pub async fn run(&self, request: ExchangeRequest) -> Result<Vec<MessageContent>, ExchangeError> {
        let adapter = self
            .adapter
            .as_ref()
            .ok_or(ExchangeError::MissingCredential)?;

        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, Self::call(adapter.as_ref(), request))
                .await
                .map_err(|_| ExchangeError::Timeout(limit))??,
            None => Self::call(adapter.as_ref(), request).await?,
        };

        Ok(interpret(response)?)
    }

    async fn call(
        adapter: &dyn ClientAdapter,
        request: ExchangeRequest,
    ) -> Result<ExchangeResponse, AdapterError> {
        match request {
            ExchangeRequest::Chat(chat) => {
                debug!(
                    history = chat.history.len(),
                    "Sending conversational exchange"
                );
                adapter
                    .conversational_exchange(&chat.persona, &chat.history, &chat.message)
                    .await
                    .map(ExchangeResponse::Chat)
            }
            ExchangeRequest::Image(image) => {
                let parts = image.parts();
                debug!(parts = parts.len(), "Sending multimodal generation");
                adapter
                    .multimodal_generate(&parts)
                    .await
                    .map(ExchangeResponse::Generation)
            }
        }
    }
}
