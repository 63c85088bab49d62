//! LLM Gateway port
//!
//! Defines the interface for communicating with the hosted chat model.

use crate::config::GenerationParams;
use async_trait::async_trait;
use diagchat_domain::Message;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for LLM communication
///
/// A single stateless call: the full conversation goes out, generated text
/// comes back. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the ordered messages and return the generated reply text.
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError>;

    /// Model identifier used for requests (for display and logging).
    fn model(&self) -> &str;
}
