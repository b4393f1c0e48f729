//! Live adapter for the `LlmClient` port using the OpenRouter chat completions API.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::ports::llm::{
    ChatMessage, CompletionError, CompletionRequest, CompletionResponse, LlmClient, LlmFuture,
};

/// Default OpenRouter chat completions endpoint.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Single-attempt client for an OpenAI-compatible chat completions endpoint.
///
/// Each call issues exactly one POST. Timeouts and retries are applied by
/// the caller.
pub struct OpenRouterClient {
    client: Client,
    api_url: String,
    api_key: String,
    default_model: String,
}

impl OpenRouterClient {
    /// Creates a client for `api_url` authenticating with `api_key`.
    ///
    /// The key is sent as given, including when it is empty.
    #[must_use]
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            default_model: default_model.into(),
        }
    }
}

/// Request body sent to the chat completions endpoint.
#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

impl LlmClient for OpenRouterClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let model = request.model.clone().unwrap_or_else(|| self.default_model.clone());
        let messages = request.messages.clone();

        Box::pin(async move {
            let body = ChatCompletionBody { model: &model, messages: &messages };
            debug!(model = %model, messages = messages.len(), url = %self.api_url, "posting chat completion");

            let response = self
                .client
                .post(&self.api_url)
                .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await
                .map_err(|e| CompletionError::Network(e.to_string()))?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| CompletionError::Network(e.to_string()))?;

            if !status.is_success() {
                return Err(CompletionError::Status { status: status.as_u16(), body: response_text });
            }

            serde_json::from_str::<CompletionResponse>(&response_text)
                .map_err(|e| CompletionError::Decode(e.to_string()))
        })
    }
}
