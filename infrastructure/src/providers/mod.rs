//! LLM provider adapters implementing the [`LlmGateway`](diagchat_application::LlmGateway) port.

mod openai_compat;

pub use openai_compat::{DEFAULT_TIMEOUT, OpenAiCompatGateway};
