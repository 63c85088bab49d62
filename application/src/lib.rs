//! Application layer for diag-chat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger, event},
    llm_gateway::{GatewayError, LlmGateway},
    metadata_store::MetadataStore,
    progress::{NoProgress, ProgressNotifier},
    prompt_source::{PromptError, PromptSource, StaticPrompt},
    session_store::{SessionStore, StoreError},
};
pub use use_cases::chat_controller::{ChatCommand, ChatController, ChatState, Status};
pub use use_cases::handle_query::{HandleUserQueryUseCase, QueryError, QueryOutcome};
pub use use_cases::session_catalog::{RenameError, SessionCatalogUseCase};
