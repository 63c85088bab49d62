//! Session store port
//!
//! Persists ordered message histories keyed by session identifier.

use diagchat_domain::{DomainError, Message, SessionId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during session store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session history in {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl StoreError {
    /// Check if the stored data itself is unreadable
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Persistence for session histories
///
/// Each call reads or rewrites the whole history; there is no append log.
/// Implementations live in the infrastructure layer.
pub trait SessionStore: Send + Sync {
    /// Stored history, or an empty history when the session has none yet.
    fn load(&self, id: &SessionId) -> Result<Vec<Message>, StoreError>;

    /// Overwrite the stored history with `history`.
    fn save(&self, id: &SessionId, history: &[Message]) -> Result<(), StoreError>;

    /// Remove the stored history. Succeeds when nothing is stored.
    fn clear(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Whether a history is stored for `id`.
    fn exists(&self, id: &SessionId) -> bool;

    /// Identifiers of all stored sessions, in a stable order.
    fn list(&self) -> Result<Vec<SessionId>, StoreError>;
}
