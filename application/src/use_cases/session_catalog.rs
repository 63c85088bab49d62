//! Session Catalog use case.
//!
//! Lists stored sessions with their display names, opens a session by
//! picker choice, renames sessions and starts fresh ones.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event,
};
use crate::ports::metadata_store::MetadataStore;
use crate::ports::session_store::{SessionStore, StoreError};
use diagchat_domain::{
    DomainError, ListedSession, Message, SessionId, SessionListing, SessionMetadata,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while renaming a session.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Please select a chat to rename")]
    NoSelection,

    #[error("Please enter a new name")]
    EmptyName,

    #[error("Chat session not found: {0}")]
    SessionNotFound(String),

    #[error("Could not save the new name: {0}")]
    Store(#[from] StoreError),
}

/// Use case for browsing and managing stored sessions.
#[derive(Clone)]
pub struct SessionCatalogUseCase {
    sessions: Arc<dyn SessionStore>,
    metadata: Arc<dyn MetadataStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SessionCatalogUseCase {
    pub fn new(sessions: Arc<dyn SessionStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self {
            sessions,
            metadata,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Snapshot of all stored sessions with their display names.
    pub fn listing(&self) -> Result<SessionListing, StoreError> {
        let entries = self
            .sessions
            .list()?
            .into_iter()
            .map(|id| ListedSession {
                display_name: self.metadata.display_name(&id),
                id,
            })
            .collect::<Vec<_>>();
        debug!("Listed {} sessions", entries.len());
        Ok(SessionListing::new(entries))
    }

    /// Resolve a picker choice against a fresh listing.
    pub fn resolve(&self, choice: &str) -> Result<Option<SessionId>, StoreError> {
        Ok(self.listing()?.resolve_choice(choice))
    }

    /// Resolve `choice` and load its history.
    ///
    /// A choice that is neither a listed name nor a valid identifier
    /// yields `None`; an identifier with no stored history yields an
    /// empty history.
    pub fn open(&self, choice: &str) -> Result<Option<(SessionId, Vec<Message>)>, StoreError> {
        let Some(id) = self.resolve(choice)? else {
            return Ok(None);
        };
        let history = self.open_id(&id)?;
        Ok(Some((id, history)))
    }

    /// Load the history of a known identifier. Display names are not
    /// consulted.
    pub fn open_id(&self, id: &SessionId) -> Result<Vec<Message>, StoreError> {
        let history = self.sessions.load(id)?;
        info!(session = %id, messages = history.len(), "Opened session");
        Ok(history)
    }

    /// Rename the session selected by picker `choice`.
    pub fn rename(&self, choice: Option<&str>, new_name: &str) -> Result<SessionId, RenameError> {
        let choice = choice
            .filter(|c| !c.trim().is_empty())
            .ok_or(RenameError::NoSelection)?;
        if new_name.trim().is_empty() {
            return Err(RenameError::EmptyName);
        }

        let id = self
            .resolve(choice)?
            .ok_or_else(|| RenameError::SessionNotFound(choice.to_string()))?;
        self.rename_id(&id, new_name)?;
        Ok(id)
    }

    /// Rename the session stored under `id`. Display names are not
    /// consulted, so another session named like `id` is left alone.
    pub fn rename_id(
        &self,
        id: &SessionId,
        new_name: &str,
    ) -> Result<SessionMetadata, RenameError> {
        if new_name.trim().is_empty() {
            return Err(RenameError::EmptyName);
        }
        if !self.sessions.exists(id) {
            return Err(RenameError::SessionNotFound(id.to_string()));
        }

        let metadata = self
            .metadata
            .set_display_name(id, new_name)
            .map_err(|e| match e {
                StoreError::Invalid(DomainError::EmptyDisplayName) => RenameError::EmptyName,
                other => RenameError::Store(other),
            })?;

        info!(session = %id, name = %metadata.display_name, "Renamed session");
        self.conversation_logger.log(ConversationEvent::for_session(
            event::SESSION_RENAMED,
            id,
            serde_json::json!({ "display_name": metadata.display_name }),
        ));
        Ok(metadata)
    }

    /// Start a new chat: generate an identifier and clear anything stored
    /// under it. Metadata is left untouched.
    pub fn new_session(&self) -> Result<SessionId, StoreError> {
        let id = SessionId::generate();
        self.sessions.clear(&id)?;
        info!(session = %id, "Started new session");
        self.conversation_logger.log(ConversationEvent::for_session(
            event::SESSION_STARTED,
            &id,
            serde_json::Value::Null,
        ));
        Ok(id)
    }

    /// Delete the stored history of `id`.
    pub fn clear(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions.clear(id)?;
        self.conversation_logger.log(ConversationEvent::for_session(
            event::SESSION_CLEARED,
            id,
            serde_json::Value::Null,
        ));
        Ok(())
    }
}
