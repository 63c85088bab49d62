//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! appropriate.

mod llm;
mod logging;
mod prompt;
mod repl;
mod storage;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use prompt::FilePromptConfig;
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("llm.temperature must be between 0.0 and 2.0 (got {0})")]
    TemperatureOutOfRange(f32),

    #[error("llm.max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// LLM endpoint, credentials and sampling
    pub llm: FileLlmConfig,
    /// Where histories and metadata live
    pub storage: FileStorageConfig,
    /// System prompt location
    pub prompt: FilePromptConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// File logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every detected issue.
    ///
    /// A missing endpoint or model is not an error here: the gateway
    /// reports it on first use, and the stores work without either.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.llm.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.llm.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self
            .llm
            .endpoint
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            issues.push(ConfigValidationError::EmptyEndpoint);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(ConfigValidationError::TemperatureOutOfRange(
                self.llm.temperature,
            ));
        }
        if self.llm.max_tokens == 0 {
            issues.push(ConfigValidationError::InvalidMaxTokens);
        }

        issues
    }
}
