//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding `<session_id>.json` histories
    pub sessions_dir: PathBuf,
    /// Directory holding `<session_id>_metadata.json` records
    pub metadata_dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from("session_logs"),
            metadata_dir: PathBuf::from("chat_metadata"),
        }
    }
}
