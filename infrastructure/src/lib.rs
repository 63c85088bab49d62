//! Infrastructure layer for diag-chat
//!
//! Adapters implementing the ports defined in the application layer:
//! JSON file stores, the HTTP chat-completions gateway, the file-backed
//! system prompt, JSONL conversation logging and configuration loading.

pub mod config;
pub mod logging;
pub mod prompt;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig,
    FilePromptConfig, FileReplConfig, FileStorageConfig,
};
pub use logging::{CONVERSATION_LOG_FILE, JsonlConversationLogger};
pub use prompt::FilePromptSource;
pub use providers::{DEFAULT_TIMEOUT, OpenAiCompatGateway};
pub use storage::{JsonMetadataStore, JsonSessionStore};
