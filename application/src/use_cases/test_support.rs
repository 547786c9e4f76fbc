//! Fake client adapters shared by use case tests.

use crate::ports::client_adapter::{AdapterError, ClientAdapter};
use async_trait::async_trait;
use mog_domain::{ContentPart, Turn};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub enum ScriptedReply {
    Chat(Option<String>),
    Generation(Vec<ContentPart>),
    Fail(AdapterError),
}

impl ScriptedReply {
    pub fn chat(text: &str) -> Self {
        ScriptedReply::Chat(Some(text.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedChat {
    pub persona: String,
    pub history: Vec<Turn>,
    pub message: String,
}

/// Pops one scripted reply per call and records what it was sent.
pub struct ScriptedAdapter {
    replies: Mutex<VecDeque<ScriptedReply>>,
    chat_calls: Mutex<Vec<RecordedChat>>,
    generation_calls: Mutex<Vec<Vec<ContentPart>>>,
}

impl ScriptedAdapter {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            chat_calls: Mutex::new(Vec::new()),
            generation_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn chat_calls(&self) -> Vec<RecordedChat> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn generation_calls(&self) -> Vec<Vec<ContentPart>> {
        self.generation_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.chat_calls.lock().unwrap().len() + self.generation_calls.lock().unwrap().len()
    }

    fn next(&self) -> Result<ScriptedReply, AdapterError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AdapterError::Other("No more replies".to_string()))
    }
}

#[async_trait]
impl ClientAdapter for ScriptedAdapter {
    async fn conversational_exchange(
        &self,
        persona: &str,
        history: &[Turn],
        message: &str,
    ) -> Result<Option<String>, AdapterError> {
        self.chat_calls.lock().unwrap().push(RecordedChat {
            persona: persona.to_string(),
            history: history.to_vec(),
            message: message.to_string(),
        });
        match self.next()? {
            ScriptedReply::Chat(text) => Ok(text),
            ScriptedReply::Fail(err) => Err(err),
            ScriptedReply::Generation(_) => {
                Err(AdapterError::Other("Scripted a generation for a chat call".to_string()))
            }
        }
    }

    async fn multimodal_generate(
        &self,
        parts: &[ContentPart],
    ) -> Result<Vec<ContentPart>, AdapterError> {
        self.generation_calls.lock().unwrap().push(parts.to_vec());
        match self.next()? {
            ScriptedReply::Generation(parts) => Ok(parts),
            ScriptedReply::Fail(err) => Err(err),
            ScriptedReply::Chat(_) => {
                Err(AdapterError::Other("Scripted a chat reply for a generation call".to_string()))
            }
        }
    }
}

/// Never answers.
pub struct StalledAdapter;

#[async_trait]
impl ClientAdapter for StalledAdapter {
    async fn conversational_exchange(
        &self,
        _persona: &str,
        _history: &[Turn],
        _message: &str,
    ) -> Result<Option<String>, AdapterError> {
        std::future::pending().await
    }

    async fn multimodal_generate(
        &self,
        _parts: &[ContentPart],
    ) -> Result<Vec<ContentPart>, AdapterError> {
        std::future::pending().await
    }
}

/// Answers "Mogged." only after `release` is notified; signals `entered`
/// as soon as a call arrives.
pub struct GatedAdapter {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedAdapter {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientAdapter for GatedAdapter {
    async fn conversational_exchange(
        &self,
        _persona: &str,
        _history: &[Turn],
        _message: &str,
    ) -> Result<Option<String>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Some("Mogged.".to_string()))
    }

    async fn multimodal_generate(
        &self,
        _parts: &[ContentPart],
    ) -> Result<Vec<ContentPart>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(vec![ContentPart::text("Mogged.")])
    }
}
