//! Domain layer for diag-chat
//!
//! This crate contains the core entities and value objects of the chat
//! front-end. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session is one ongoing conversation, identified by a short opaque
//! [`SessionId`] and backed by an ordered history of [`Message`]s.
//!
//! ## Display name
//!
//! A user-chosen label stored separately from the history
//! ([`SessionMetadata`]). When none exists the identifier itself is shown.
//! [`SessionListing`] resolves names back to identifiers for one listing
//! snapshot.

pub mod core;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use prompt::{SystemPrompt, compose_request};
pub use session::{
    entities::{Message, Role},
    listing::{ListedSession, SessionListing},
    metadata::{MetadataLookup, SessionMetadata},
    session_id::SessionId,
};
