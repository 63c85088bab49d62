//! Chat session domain.
//!
//! - [`entities::Message`] - a single message within a session history
//! - [`session_id::SessionId`] - validated session identifier
//! - [`metadata::SessionMetadata`] - user-assigned display name
//! - [`listing::SessionListing`] - display name ↔ identifier snapshot

pub mod entities;
pub mod listing;
pub mod metadata;
pub mod session_id;
