//! System prompt source port

use diagchat_domain::SystemPrompt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("System prompt unavailable at {location}: {reason}")]
    Unavailable { location: String, reason: String },
}

/// Supplies the system prompt. Read on every query so edits take effect
/// without a restart.
pub trait PromptSource: Send + Sync {
    fn load(&self) -> Result<SystemPrompt, PromptError>;
}

/// Fixed in-memory prompt, used by tests and `--no-prompt` runs.
pub struct StaticPrompt(pub SystemPrompt);

impl PromptSource for StaticPrompt {
    fn load(&self) -> Result<SystemPrompt, PromptError> {
        Ok(self.0.clone())
    }
}
