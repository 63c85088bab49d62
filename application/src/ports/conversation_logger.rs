//! Port for structured conversation logging.
//!
//! Separate from `tracing`: tracing carries human-readable diagnostics,
//! this port records the chat itself (queries, replies, session lifecycle)
//! in a machine-readable form.

use diagchat_domain::SessionId;
use serde_json::{Map, Value};

/// Event types emitted by the use cases.
pub mod event {
    pub const USER_QUERY: &str = "user_query";
    pub const ASSISTANT_REPLY: &str = "assistant_reply";
    pub const SESSION_STARTED: &str = "session_started";
    pub const SESSION_CLEARED: &str = "session_cleared";
    pub const SESSION_RENAMED: &str = "session_renamed";
}

/// A structured conversation event.
pub struct ConversationEvent {
    /// One of the [`event`] constants.
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Event about `session`: `fields` plus a `session` key.
    ///
    /// Non-object `fields` are kept under `data`.
    pub fn for_session(event_type: &'static str, session: &SessionId, fields: Value) -> Self {
        let mut map = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => Map::from_iter([("data".to_string(), other)]),
        };
        map.insert("session".to_string(), Value::String(session.to_string()));
        Self::new(event_type, Value::Object(map))
    }

    /// `session` field of the payload, when present.
    pub fn session(&self) -> Option<&str> {
        self.payload.get("session").and_then(Value::as_str)
    }
}

/// Sink for conversation events.
///
/// Synchronous and infallible: a failing log never interrupts a chat.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
