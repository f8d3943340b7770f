//! HTTP completion backends for the turn narrative.
//!
//! The engine is generic over one [`TextCompletion`] type, so the backend
//! picked at startup is wrapped in the [`LlmBackend`] enum. Both remote
//! flavours share an [`Endpoint`] and differ only in request shape and in
//! where the reply text lives.
//!
//! The deadline is enforced by the engine, not here.

use manifest_core::{CompletionError, CompletionPrompt, TextCompletion};
use reqwest::RequestBuilder;

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::RunnerError;

/// Upper bound on generated tokens per turn.
const MAX_TOKENS: u32 = 400;

/// Sampling temperature for chat-completions requests.
const TEMPERATURE: f64 = 0.8;

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// The narrative backend chosen at startup.
pub enum LlmBackend {
    /// A `/chat/completions` endpoint.
    OpenAi(OpenAiBackend),
    /// A `/messages` endpoint.
    Anthropic(AnthropicBackend),
    /// No credentials; every call fails so the engine falls back.
    Offline,
}

impl TextCompletion for LlmBackend {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        let reply = match self {
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
            Self::Offline => return Err(CompletionError::NotConfigured),
        };
        reply.map_err(|e| CompletionError::Backend(e.to_string()))
    }

    fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Debug for LlmBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LlmBackend").field(&self.name()).finish()
    }
}

/// Where a backend sends its requests.
struct Endpoint {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Endpoint {
    fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn post(&self, route: &str) -> RequestBuilder {
        self.client.post(format!("{}/{route}", self.base_url))
    }

    /// Send `request` and decode a successful JSON reply.
    async fn send(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<serde_json::Value, RunnerError> {
        let response = request
            .send()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("{label} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RunnerError::LlmBackend(format!("{label} returned {status}: {detail}")));
        }

        response
            .json()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("{label} reply was not JSON: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Chat completions
// ---------------------------------------------------------------------------

/// Bearer-authenticated chat completions; the system prompt is the first message.
pub struct OpenAiBackend {
    endpoint: Endpoint,
}

impl OpenAiBackend {
    /// Backend for `config`.
    fn new(config: &LlmBackendConfig) -> Self {
        Self {
            endpoint: Endpoint::new(config),
        }
    }

    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, RunnerError> {
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        });
        let request = self
            .endpoint
            .post("chat/completions")
            .bearer_auth(&self.endpoint.api_key)
            .json(&body);

        let reply = self.endpoint.send("chat completion", request).await?;
        chat_reply_text(&reply)
    }
}

/// `choices[0].message.content`, trimmed.
fn chat_reply_text(reply: &serde_json::Value) -> Result<String, RunnerError> {
    reply
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .map(|s| s.trim().to_owned())
        .ok_or_else(|| RunnerError::LlmBackend("chat completion had no message content".to_owned()))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Key-authenticated messages endpoint; the system prompt is a top-level field.
pub struct AnthropicBackend {
    endpoint: Endpoint,
}

impl AnthropicBackend {
    /// Backend for `config`.
    fn new(config: &LlmBackendConfig) -> Self {
        Self {
            endpoint: Endpoint::new(config),
        }
    }

    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, RunnerError> {
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "max_tokens": MAX_TOKENS,
            "system": prompt.system,
            "messages": [{"role": "user", "content": prompt.user}]
        });
        let request = self
            .endpoint
            .post("messages")
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let reply = self.endpoint.send("messages", request).await?;
        messages_reply_text(&reply)
    }
}

/// `content[0].text`, trimmed.
fn messages_reply_text(reply: &serde_json::Value) -> Result<String, RunnerError> {
    reply
        .pointer("/content/0/text")
        .and_then(serde_json::Value::as_str)
        .map(|s| s.trim().to_owned())
        .ok_or_else(|| RunnerError::LlmBackend("messages reply had no text block".to_owned()))
}

/// Backend for `config`; `None` yields [`LlmBackend::Offline`].
pub fn create_backend(config: Option<&LlmBackendConfig>) -> LlmBackend {
    let Some(cfg) = config else {
        return LlmBackend::Offline;
    };
    match cfg.backend_type {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(cfg)),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(cfg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend_type: BackendType) -> LlmBackendConfig {
        LlmBackendConfig {
            backend_type,
            api_url: "http://localhost:9/v1/".to_owned(),
            api_key: "test".to_owned(),
            model: "test-model".to_owned(),
        }
    }

    #[test]
    fn chat_reply_is_trimmed() {
        let reply = serde_json::json!({
            "choices": [{"message": {"content": "  Your abundance is already on its way.\n"}}]
        });
        assert_eq!(
            chat_reply_text(&reply).unwrap_or_default(),
            "Your abundance is already on its way."
        );
    }

    #[test]
    fn chat_reply_without_choices_is_an_error() {
        let reply = serde_json::json!({"error": "rate_limit"});
        assert!(chat_reply_text(&reply).is_err());
    }

    #[test]
    fn messages_reply_reads_first_text_block() {
        let reply = serde_json::json!({"content": [{"type": "text", "text": "Picture it done."}]});
        assert_eq!(messages_reply_text(&reply).unwrap_or_default(), "Picture it done.");
    }

    #[test]
    fn empty_messages_reply_is_an_error() {
        let reply = serde_json::json!({"content": []});
        assert!(messages_reply_text(&reply).is_err());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let endpoint = Endpoint::new(&config(BackendType::OpenAi));
        assert_eq!(endpoint.base_url, "http://localhost:9/v1");
    }

    #[test]
    fn create_backend_dispatches_correctly() {
        let backend = create_backend(Some(&config(BackendType::OpenAi)));
        assert_eq!(backend.name(), "openai-compatible");

        let backend = create_backend(Some(&config(BackendType::Anthropic)));
        assert_eq!(backend.name(), "anthropic");

        assert_eq!(create_backend(None).name(), "offline");
    }

    #[tokio::test]
    async fn offline_backend_is_not_configured() {
        let prompt = CompletionPrompt {
            system: "s".to_owned(),
            user: "u".to_owned(),
        };
        assert_eq!(
            create_backend(None).complete(&prompt).await,
            Err(CompletionError::NotConfigured)
        );
    }
}
