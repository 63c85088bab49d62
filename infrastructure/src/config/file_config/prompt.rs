//! System prompt configuration from TOML (`[prompt]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    /// Plain-text file whose content becomes the system message
    pub system_prompt_path: PathBuf,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        Self {
            system_prompt_path: PathBuf::from("prompts").join("system_prompt.txt"),
        }
    }
}
