//! LLM endpoint configuration from TOML (`[llm]` section)

use diagchat_application::GenerationParams;
use serde::{Deserialize, Serialize};

/// Raw LLM configuration from TOML
///
/// # Example
///
/// ```toml
/// [llm]
/// endpoint = "https://api.groq.com/openai/v1/chat/completions"
/// api_key_env = "GROQ_API_KEY"
/// model = "llama-3.3-70b-versatile"
/// temperature = 0.7
/// max_tokens = 800
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response-length cap.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            endpoint: None,
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            model: None,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            timeout_seconds: 120,
        }
    }
}

impl FileLlmConfig {
    /// Resolve the API key: the explicit value wins, then `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}
