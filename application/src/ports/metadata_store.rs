//! Session metadata store port
//!
//! Persists the display name of each session, separately from its history.

use crate::ports::session_store::StoreError;
use diagchat_domain::{MetadataLookup, SessionId, SessionMetadata};

/// Persistence for per-session display names
pub trait MetadataStore: Send + Sync {
    /// Read the metadata record for `id`.
    ///
    /// Never fails: unreadable records are reported as
    /// [`MetadataLookup::Malformed`].
    fn lookup(&self, id: &SessionId) -> MetadataLookup;

    /// Write or overwrite the metadata record for `id`.
    fn store(&self, id: &SessionId, metadata: &SessionMetadata) -> Result<(), StoreError>;

    /// The stored display name, falling back to the identifier.
    fn display_name(&self, id: &SessionId) -> String {
        self.lookup(id).display_name_or(id)
    }

    /// Trim `name` and store it as the display name for `id`.
    fn set_display_name(&self, id: &SessionId, name: &str) -> Result<SessionMetadata, StoreError> {
        let metadata = SessionMetadata::new(name)?;
        self.store(id, &metadata)?;
        Ok(metadata)
    }
}
