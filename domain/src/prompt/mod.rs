//! System prompt and request composition.

use crate::session::entities::Message;

/// Fixed instructional text prepended to every outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemPrompt(String);

impl SystemPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Build the outgoing message list: `[system] + history + [user]`.
///
/// A missing or blank system prompt is left out rather than sent as an
/// empty system message.
pub fn compose_request(
    system_prompt: Option<&SystemPrompt>,
    history: &[Message],
    user_input: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if let Some(prompt) = system_prompt.filter(|p| !p.is_blank()) {
        messages.push(Message::system(prompt.as_str()));
    }
    messages.extend_from_slice(history);
    messages.push(Message::user(user_input));
    messages
}
