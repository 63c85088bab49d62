//! OpenAI-compatible chat-completions gateway (Groq and friends).

use crate::config::FileLlmConfig;
use async_trait::async_trait;
use diagchat_application::{GatewayError, GenerationParams, LlmGateway};
use diagchat_domain::Message;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shown as the model name when none is configured.
const UNSET_MODEL: &str = "(unset)";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`LlmGateway`] that POSTs the whole conversation to a chat-completions
/// endpoint with bearer authentication.
///
/// Missing endpoint, key or model are reported per call as
/// [`GatewayError::NotConfigured`], so the rest of the application keeps
/// working without credentials.
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
}

impl std::fmt::Debug for OpenAiCompatGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatGateway")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiCompatGateway {
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.filter(|s| !s.trim().is_empty()),
            api_key,
            model: model.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Build from the `[llm]` section, reading the key from `api_key_env`.
    pub fn from_config(config: &FileLlmConfig) -> Self {
        let gateway = Self::new(
            config.endpoint.clone(),
            config.resolve_api_key(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        );
        info!(
            endpoint = gateway.endpoint.as_deref().unwrap_or("(unset)"),
            model = gateway.model(),
            has_key = gateway.api_key.is_some(),
            "LLM gateway configured"
        );
        gateway
    }

    /// Whether endpoint, key and model are all present.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some() && self.model.is_some()
    }

    fn headers(api_key: &str) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            GatewayError::NotConfigured("API key contains invalid header characters".into())
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn map_send_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::ConnectionError(e.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("no endpoint URL set".into()))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("no API key set".into()))?;
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("no model name set".into()))?;

        let body = ChatRequest {
            model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        debug!(model, messages = messages.len(), "POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .headers(Self::headers(api_key)?)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::map_send_error)?;

        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("{e}: {text}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".into()))?
            .message
            .content
            .ok_or_else(|| GatewayError::InvalidResponse("choice has no content".into()))?;

        debug!(bytes = content.len(), "Completion received");
        Ok(content.trim().to_string())
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(UNSET_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> OpenAiCompatGateway {
        OpenAiCompatGateway::new(
            Some(format!("{}/v1/chat/completions", server.uri())),
            Some("test-key".into()),
            Some("llama-test".into()),
            DEFAULT_TIMEOUT,
        )
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("You are an automotive diagnostic assistant."),
            Message::user("what does P0300 mean?"),
        ]
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "model": "llama-test",
                "messages": [
                    {"role": "system", "content": "You are an automotive diagnostic assistant."},
                    {"role": "user", "content": "what does P0300 mean?"}
                ],
                "max_tokens": 800
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Random misfire.\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = gateway_for(&server)
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap();

        assert_eq!(reply, "Random misfire.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        match err {
            GatewayError::RequestFailed(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let gateway = OpenAiCompatGateway::new(
            Some(format!("{}/v1/chat/completions", server.uri())),
            Some("test-key".into()),
            Some("llama-test".into()),
            Duration::from_millis(200),
        );

        let err = gateway
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Timeout));
    }

    #[tokio::test]
    async fn test_missing_settings_are_not_configured() {
        let gateway = OpenAiCompatGateway::new(None, Some("k".into()), Some("m".into()), DEFAULT_TIMEOUT);
        assert!(!gateway.is_configured());
        let err = gateway
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(_)));

        let gateway = OpenAiCompatGateway::new(
            Some("http://localhost:1/v1/chat/completions".into()),
            None,
            None,
            DEFAULT_TIMEOUT,
        );
        assert_eq!(gateway.model(), UNSET_MODEL);
        let err = gateway
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let gateway = OpenAiCompatGateway::new(
            Some("http://127.0.0.1:9/v1/chat/completions".into()),
            Some("k".into()),
            Some("m".into()),
            Duration::from_secs(5),
        );
        let err = gateway
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::Timeout
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let gateway = OpenAiCompatGateway::new(None, Some("secret".into()), None, DEFAULT_TIMEOUT);
        let shown = format!("{gateway:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("REDACTED"));
    }
}
