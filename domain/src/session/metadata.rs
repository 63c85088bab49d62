//! Session metadata (display names)

use crate::core::error::DomainError;
use crate::session::session_id::SessionId;
use serde::{Deserialize, Serialize};

/// Per-session metadata stored alongside, but independently of, the
/// message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub display_name: String,
}

impl SessionMetadata {
    /// Create metadata from a user-supplied name.
    ///
    /// Surrounding whitespace is trimmed; a blank name is rejected.
    pub fn new(display_name: &str) -> Result<Self, DomainError> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }
        Ok(Self {
            display_name: trimmed.to_string(),
        })
    }
}

/// Outcome of reading a session's metadata record.
///
/// Keeps "no record" and "unreadable record" apart so callers can choose
/// their own policy; [`display_name_or`](Self::display_name_or) applies
/// the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLookup {
    /// No metadata record exists for the session.
    Absent,
    /// A record exists but could not be read or parsed.
    Malformed(String),
    /// A valid record.
    Present(SessionMetadata),
}

impl MetadataLookup {
    /// The stored display name, or the identifier when there is none.
    pub fn display_name_or(&self, id: &SessionId) -> String {
        match self {
            MetadataLookup::Present(meta) => meta.display_name.clone(),
            MetadataLookup::Absent | MetadataLookup::Malformed(_) => id.to_string(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, MetadataLookup::Present(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> SessionId {
        SessionId::new("abc123").unwrap()
    }

    #[test]
    fn test_new_trims_name() {
        let meta = SessionMetadata::new("  Brake Issue  ").unwrap();
        assert_eq!(meta.display_name, "Brake Issue");
    }

    #[test]
    fn test_new_rejects_blank() {
        assert_eq!(
            SessionMetadata::new("   "),
            Err(DomainError::EmptyDisplayName)
        );
    }

    #[test]
    fn test_display_name_defaults_to_id() {
        assert_eq!(MetadataLookup::Absent.display_name_or(&id()), "abc123");
        assert_eq!(
            MetadataLookup::Malformed("expected value".into()).display_name_or(&id()),
            "abc123"
        );
    }

    #[test]
    fn test_display_name_present() {
        let lookup = MetadataLookup::Present(SessionMetadata::new("Brake Issue").unwrap());
        assert!(lookup.is_present());
        assert_eq!(lookup.display_name_or(&id()), "Brake Issue");
    }

    #[test]
    fn test_metadata_json_shape() {
        let json = serde_json::to_value(SessionMetadata::new("Misfire").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"display_name": "Misfire"}));
    }
}
