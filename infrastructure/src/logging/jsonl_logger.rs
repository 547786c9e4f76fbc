//! JSONL transcript writer.
//!
//! Each [`ConversationEvent`] becomes one `Record` line: `type` and
//! `timestamp` followed by the payload's own fields. A payload that is not a
//! JSON object is kept under `data`. The file is opened in append mode, so
//! successive runs extend the same transcript.

use mog_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    body: Body<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
    Fields(&'a Map<String, Value>),
    Data { data: &'a Value },
}

impl<'a> Record<'a> {
    fn new(event: &'a ConversationEvent) -> Self {
        let body = match &event.payload {
            Value::Object(fields) => Body::Fields(fields),
            data => Body::Data { data },
        };
        Self {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body,
        }
    }
}

/// Transcript logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; the agent then runs
    /// without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut line) = serde_json::to_vec(&Record::new(&event)) else {
            return;
        };
        line.push(b'\n');

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(&line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mog.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "id": 1, "role": "user", "kind": "text", "text": "wen moon" }),
        ));
        logger.log(ConversationEvent::new(
            "agent_message",
            serde_json::json!({ "id": 2, "role": "agent", "kind": "image", "media_type": "image/png", "bytes": 42 }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "user_message");
        assert_eq!(records[0]["text"], "wen moon");
        assert_eq!(records[1]["type"], "agent_message");
        assert_eq!(records[1]["media_type"], "image/png");
        assert_eq!(records[1]["bytes"], 42);
    }

    #[test]
    fn test_type_and_timestamp_lead_each_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "mode_changed",
            serde_json::json!({ "mode": "chat" }),
        ));
        drop(logger);

        let line = std::fs::read_to_string(&path).unwrap();
        assert!(line.starts_with(r#"{"type":"mode_changed","timestamp":""#));
        assert!(line.trim_end().ends_with(r#""mode":"chat"}"#));
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "exchange_failed",
            serde_json::json!("Exchange timed out"),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "exchange_failed");
        assert_eq!(records[0]["data"], "Exchange timed out");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("transcript.jsonl");

        for mode in ["chat", "image-generation"] {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                "mode_changed",
                serde_json::json!({ "mode": mode }),
            ));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["mode"], "image-generation");
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        assert!(JsonlConversationLogger::new(dir.path()).is_none());
    }
}
