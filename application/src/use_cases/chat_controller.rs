//! Chat controller: the command interface behind any front-end.
//!
//! Every user action is a [`ChatCommand`]. [`ChatController::apply`] takes
//! the current [`ChatState`] and a command and returns the next state; the
//! current session identifier travels inside the state instead of living
//! in process-wide storage. Front-ends only render states.

use crate::ports::progress::ProgressNotifier;
use crate::use_cases::handle_query::HandleUserQueryUseCase;
use crate::use_cases::session_catalog::{RenameError, SessionCatalogUseCase};
use diagchat_domain::{Message, SessionId, SessionListing};
use tracing::warn;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Send a message in the current session.
    Submit(String),
    /// Start a fresh session.
    NewChat,
    /// Reload the session listing.
    Refresh,
    /// Switch to the session picked by display name (or identifier).
    Select(String),
    /// Rename the selected session.
    Rename(String),
}

/// Feedback line shown after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Status::Info(m) | Status::Error(m) => m,
        }
    }
}

/// Everything a front-end needs to render the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    /// Session that `Submit` writes to.
    pub session_id: SessionId,
    /// History of the current session.
    pub transcript: Vec<Message>,
    /// Listing snapshot used for picking and renaming.
    pub listing: SessionListing,
    /// Session picked for renaming, resolved when it was selected.
    pub selected: Option<SessionId>,
    /// Outcome of the last command, if it produced one.
    pub status: Option<Status>,
}

impl ChatState {
    /// Empty state for `session_id`.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            transcript: Vec::new(),
            listing: SessionListing::default(),
            selected: None,
            status: None,
        }
    }

    /// Select the current session itself, so a `Rename` targets it.
    pub fn select_current(mut self) -> Self {
        self.selected = Some(self.session_id.clone());
        self
    }

    /// Last assistant message of the transcript.
    pub fn last_reply(&self) -> Option<&str> {
        self.transcript
            .last()
            .filter(|m| m.role == diagchat_domain::Role::Assistant)
            .map(|m| m.content.as_str())
    }

    fn with_error(mut self, error: impl std::fmt::Display) -> Self {
        warn!("{}", error);
        self.status = Some(Status::Error(format!("Error: {}", error)));
        self
    }
}

/// Maps commands onto the query and catalog use cases.
#[derive(Clone)]
pub struct ChatController {
    query: HandleUserQueryUseCase,
    catalog: SessionCatalogUseCase,
}

impl ChatController {
    pub fn new(query: HandleUserQueryUseCase, catalog: SessionCatalogUseCase) -> Self {
        Self { query, catalog }
    }

    pub fn catalog(&self) -> &SessionCatalogUseCase {
        &self.catalog
    }

    /// Initial state: resume `session_id` if given, otherwise start fresh.
    pub fn start(&self, session_id: Option<SessionId>) -> ChatState {
        let resumed = session_id.is_some();
        let id = session_id.unwrap_or_else(SessionId::generate);
        let mut state = self.refresh(ChatState::new(id));
        if resumed {
            match self.catalog.open_id(&state.session_id) {
                Ok(history) => state.transcript = history,
                Err(e) => return state.with_error(e),
            }
        }
        state
    }

    /// Apply one command and return the next state.
    pub async fn apply(
        &self,
        state: ChatState,
        command: ChatCommand,
        progress: &dyn ProgressNotifier,
    ) -> ChatState {
        match command {
            ChatCommand::Submit(text) => self.submit(state, &text, progress).await,
            ChatCommand::NewChat => self.new_chat(state),
            ChatCommand::Refresh => {
                let mut state = self.refresh(state);
                state.selected = None;
                state
            }
            ChatCommand::Select(choice) => self.select(state, choice),
            ChatCommand::Rename(name) => self.rename(state, &name),
        }
    }

    async fn submit(
        &self,
        mut state: ChatState,
        text: &str,
        progress: &dyn ProgressNotifier,
    ) -> ChatState {
        match self
            .query
            .execute_with_progress(text, &state.session_id, progress)
            .await
        {
            Ok(outcome) => {
                state.transcript = outcome.history;
                state.status = None;
                self.refresh(state)
            }
            Err(e) => state.with_error(e),
        }
    }

    fn new_chat(&self, state: ChatState) -> ChatState {
        match self.catalog.new_session() {
            Ok(id) => {
                let mut next = ChatState::new(id);
                next.listing = state.listing;
                next
            }
            Err(e) => state.with_error(e),
        }
    }

    fn select(&self, mut state: ChatState, choice: String) -> ChatState {
        match self.catalog.open(&choice) {
            Ok(Some((id, history))) => {
                state.selected = Some(id.clone());
                state.session_id = id;
                state.transcript = history;
                state.status = None;
                state
            }
            Ok(None) => state.with_error(format!("Unknown chat: {}", choice)),
            Err(e) => state.with_error(e),
        }
    }

    fn rename(&self, state: ChatState, new_name: &str) -> ChatState {
        let Some(id) = state.selected.clone() else {
            return state.with_error(RenameError::NoSelection);
        };
        match self.catalog.rename_id(&id, new_name) {
            Ok(_) => {
                let mut state = self.refresh(state);
                state.status = Some(Status::Info("Chat renamed successfully!".to_string()));
                state
            }
            Err(e) => state.with_error(e),
        }
    }

    fn refresh(&self, mut state: ChatState) -> ChatState {
        match self.catalog.listing() {
            Ok(listing) => {
                state.listing = listing;
                state
            }
            Err(e) => state.with_error(e),
        }
    }
}
