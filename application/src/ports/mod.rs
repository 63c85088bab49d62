//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod metadata_store;
pub mod progress;
pub mod prompt_source;
pub mod session_store;
