//! Append-only JSONL transcript of conversation events.
//!
//! One line per [`ConversationEvent`]: the event's payload fields with
//! `type` and `timestamp` added. Every run from the same log directory
//! appends to the same file, so sessions are told apart by their
//! `session` field.

use chrono::{SecondsFormat, Utc};
use diagchat_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// File name used by [`JsonlConversationLogger::in_dir`].
pub const CONVERSATION_LOG_FILE: &str = "diag-chat.conversation.jsonl";

/// [`ConversationLogger`] appending to a JSONL file.
///
/// Each line goes out in a single write, so nothing is buffered between
/// events.
pub struct JsonlConversationLogger {
    file: Mutex<File>,
    path: PathBuf,
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Payload fields plus `type` and `timestamp`. The logger's own keys win
/// over payload fields of the same name.
fn record(event: ConversationEvent, timestamp: String) -> Value {
    let mut fields = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => Map::from_iter([("data".to_string(), other)]),
    };
    fields.insert("type".into(), Value::from(event.event_type));
    fields.insert("timestamp".into(), Value::from(timestamp));
    Value::Object(fields)
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating parent directories.
    ///
    /// An unusable path is logged at `warn` and yields `None`; the chat
    /// then runs without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Conversation log {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    /// Open [`CONVERSATION_LOG_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        Self::new(dir.as_ref().join(CONVERSATION_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let event_type = event.event_type;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut line = match serde_json::to_string(&record(event, timestamp)) {
            Ok(line) => line,
            Err(e) => {
                warn!("Dropping {} event: {}", event_type, e);
                return;
            }
        };
        line.push('\n');

        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("Could not append to {}: {}", self.path.display(), e);
        }
    }
}
