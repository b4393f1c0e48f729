//! LLM client port for chat completions.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, CompletionError>> + Send + 'a>>;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// Text supplied by the operator.
    User,
    /// Text produced by the model.
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A request for one chat completion.
///
/// `messages` is sent verbatim and in order. When `model` is `None` the
/// client substitutes its configured default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `"mistralai/mixtral-8x22b-instruct"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Conversation history.
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Creates a request that uses the client's default model.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { model: None, messages }
    }

    /// Pins the request to a specific model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// One generated alternative in a completion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChatMessage,
    /// Why generation stopped, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated in the reply.
    pub completion_tokens: u32,
    /// Sum of prompt and completion tokens.
    pub total_tokens: u32,
}

/// Decoded response of a chat completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned response ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Model that actually served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generated alternatives; the first is the one the workflows use.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Returns the text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::EmptyResponse`] if the response has no choices.
    pub fn content(&self) -> Result<&str, CompletionError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(CompletionError::EmptyResponse)
    }
}

/// Failure of a chat completion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(String),
    /// No response arrived within the per-attempt bound.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// The body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The response decoded but carried no choices.
    #[error("response contained no choices")]
    EmptyResponse,
}

impl CompletionError {
    /// Returns the HTTP status code for [`CompletionError::Status`] failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends chat completion requests to a language model.
///
/// One call is one attempt; retrying is layered on top by
/// [`ChatCompletionClient`](crate::completion::ChatCompletionClient).
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, status, decode, etc.).
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_>;
}
