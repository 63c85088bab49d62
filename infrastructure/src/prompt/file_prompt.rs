use diagchat_application::{PromptError, PromptSource};
use diagchat_domain::SystemPrompt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`PromptSource`] that re-reads a UTF-8 text file on every call.
#[derive(Debug, Clone)]
pub struct FilePromptSource {
    path: PathBuf,
}

impl FilePromptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PromptSource for FilePromptSource {
    fn load(&self) -> Result<SystemPrompt, PromptError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| PromptError::Unavailable {
            location: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(bytes = text.len(), "Loaded system prompt from {}", self.path.display());
        Ok(SystemPrompt::new(text))
    }
}
