//! Session listing snapshot with display name resolution.
//!
//! Display names are not unique. A [`SessionListing`] fixes one ordering
//! of the sessions so that resolving a name back to an identifier is
//! deterministic: the first entry carrying that name wins.

use crate::session::session_id::SessionId;

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSession {
    pub display_name: String,
    pub id: SessionId,
}

/// Ordered snapshot of the stored sessions and their display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionListing {
    entries: Vec<ListedSession>,
}

impl SessionListing {
    pub fn new(entries: Vec<ListedSession>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ListedSession] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Display names in listing order (what a picker shows).
    pub fn choices(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    /// Display name for an identifier in this snapshot.
    pub fn display_name_of(&self, id: &SessionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.display_name.as_str())
    }

    /// Resolve a display name to the first matching identifier.
    pub fn resolve(&self, display_name: &str) -> Option<&SessionId> {
        self.entries
            .iter()
            .find(|e| e.display_name == display_name)
            .map(|e| &e.id)
    }

    /// Resolve a picker choice: a display name first, otherwise the
    /// choice itself if it is a valid identifier.
    pub fn resolve_choice(&self, choice: &str) -> Option<SessionId> {
        self.resolve(choice)
            .cloned()
            .or_else(|| SessionId::new(choice).ok())
    }

    /// True when more than one session shares `display_name`.
    pub fn is_ambiguous(&self, display_name: &str) -> bool {
        self.entries
            .iter()
            .filter(|e| e.display_name == display_name)
            .take(2)
            .count()
            > 1
    }
}
