//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "logs"
/// conversation_log = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the rolling diagnostic log and conversation logs.
    /// File logging is off when unset.
    pub dir: Option<PathBuf>,
    /// Write a JSONL conversation transcript per run into `dir`
    pub conversation_log: bool,
}
