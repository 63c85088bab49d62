//! Sampling controls for the LLM request.
//!
//! [`GenerationParams`] travels with every call to
//! [`LlmGateway::complete`](crate::ports::llm_gateway::LlmGateway::complete).
//! The gateway owns endpoint, credentials and model; the use case owns
//! how the model samples.

use serde::{Deserialize, Serialize};

/// Sampling temperature sent when nothing else is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Response-length cap sent when nothing else is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Sampling controls for one completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens in the reply.
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
