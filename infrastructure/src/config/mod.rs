//! Configuration loading for diag-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `GROQ_API_ENDPOINT`, `GROQ_API_KEY`, `MODEL_NAME`,
//!    then `DIAG_CHAT_*` keys
//! 2. `--config <path>` specified file
//! 3. Project root: `./diag-chat.toml` or `./.diag-chat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/diag-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig, FilePromptConfig,
    FileReplConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
