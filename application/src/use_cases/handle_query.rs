//! Handle User Query use case.
//!
//! Sends one user message within a session and records the exchange:
//!
//! 1. Load the session history
//! 2. Compose `[system prompt] + history + [user message]`
//! 3. Ask the [`LlmGateway`] for a reply
//! 4. Append the user message and the reply to the history
//! 5. Persist the history
//!
//! Upstream failures do not surface as errors. They are turned into an
//! assistant reply describing the failure, and that reply is persisted
//! like any other, so the failure becomes part of the conversation.

use crate::config::GenerationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::prompt_source::PromptSource;
use crate::ports::session_store::{SessionStore, StoreError};
use diagchat_domain::util::preview;
use diagchat_domain::{DomainError, Message, SessionId, compose_request};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Prefix of the synthetic reply stored when the upstream call fails.
pub const ERROR_REPLY_PREFIX: &str = "Error contacting LLM API";

/// Errors that can occur while handling a query.
///
/// Gateway failures are absent: they become replies.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a handled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// The assistant reply (or synthetic error reply).
    pub reply: String,
    /// Full session history after the exchange, as persisted.
    pub history: Vec<Message>,
    /// Whether `reply` came from the model rather than an upstream failure.
    pub from_model: bool,
}

/// Use case for handling a user query within a session.
pub struct HandleUserQueryUseCase {
    gateway: Arc<dyn LlmGateway>,
    sessions: Arc<dyn SessionStore>,
    prompt: Arc<dyn PromptSource>,
    params: GenerationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for HandleUserQueryUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            sessions: self.sessions.clone(),
            prompt: self.prompt.clone(),
            params: self.params,
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl HandleUserQueryUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        sessions: Arc<dyn SessionStore>,
        prompt: Arc<dyn PromptSource>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            prompt,
            params: GenerationParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Override the sampling parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Handle a query without progress reporting.
    pub async fn execute(
        &self,
        input: &str,
        session_id: &SessionId,
    ) -> Result<QueryOutcome, QueryError> {
        self.execute_with_progress(input, session_id, &NoProgress)
            .await
    }

    /// Handle a query, reporting the in-flight request to `progress`.
    pub async fn execute_with_progress(
        &self,
        input: &str,
        session_id: &SessionId,
        progress: &dyn ProgressNotifier,
    ) -> Result<QueryOutcome, QueryError> {
        if input.trim().is_empty() {
            return Err(DomainError::EmptyQuery.into());
        }

        info!(session = %session_id, "Handling query: {}", preview(input, 80));

        let mut history = self.sessions.load(session_id)?;

        let system_prompt = match self.prompt.load() {
            Ok(prompt) => Some(prompt),
            Err(e) => {
                warn!("Sending without system prompt: {}", e);
                None
            }
        };

        let messages = compose_request(system_prompt.as_ref(), &history, input);
        debug!(
            session = %session_id,
            messages = messages.len(),
            model = self.gateway.model(),
            "Composed request"
        );

        self.conversation_logger.log(ConversationEvent::for_session(
            event::USER_QUERY,
            session_id,
            serde_json::json!({
                "model": self.gateway.model(),
                "text": input,
            }),
        ));

        progress.on_request_start(self.gateway.model());
        let result = self.gateway.complete(&messages, &self.params).await;
        progress.on_request_end(result.is_ok());

        let (reply, from_model) = match result {
            Ok(text) if !text.trim().is_empty() => (text, true),
            Ok(_) => (
                error_reply(&GatewayError::InvalidResponse(
                    "model returned an empty reply".to_string(),
                )),
                false,
            ),
            Err(e) => {
                warn!(session = %session_id, "LLM request failed: {}", e);
                (error_reply(&e), false)
            }
        };

        history.push(Message::user(input));
        history.push(Message::assistant(reply.clone()));
        self.sessions.save(session_id, &history)?;

        self.conversation_logger.log(ConversationEvent::for_session(
            event::ASSISTANT_REPLY,
            session_id,
            serde_json::json!({
                "from_model": from_model,
                "bytes": reply.len(),
                "text": reply,
            }),
        ));

        info!(
            session = %session_id,
            messages = history.len(),
            "Query handled"
        );

        Ok(QueryOutcome {
            reply,
            history,
            from_model,
        })
    }
}

/// Synthetic reply text for a failed upstream call.
pub fn error_reply(error: &GatewayError) -> String {
    format!("{}: {}", ERROR_REPLY_PREFIX, error)
}
