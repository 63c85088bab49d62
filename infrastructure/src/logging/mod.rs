//! Structured conversation transcript logging.
//!
//! [`JsonlConversationLogger`] implements the
//! [`ConversationLogger`](diagchat_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::{CONVERSATION_LOG_FILE, JsonlConversationLogger};
