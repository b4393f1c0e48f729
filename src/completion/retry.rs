//! Bounded retry loop around a single-attempt chat completion client.

use std::time::Duration;

use tracing::debug;

use super::observer::{AttemptObserver, SilentObserver};
use super::timing::{delay, with_timeout};
use crate::ports::llm::{
    CompletionError, CompletionRequest, CompletionResponse, LlmClient, LlmFuture,
};

/// Number of retries after the initial attempt.
pub const MAX_RETRIES: u32 = 3;
/// Per-attempt bound on waiting for a response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
/// Fixed wait between a failed attempt and the next one.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);

/// Retry behavior for one logical chat completion request.
///
/// The backoff is constant: every retry waits the same duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Bound on each individual attempt.
    pub timeout: Duration,
    /// Wait between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: MAX_RETRIES, timeout: DEFAULT_TIMEOUT, backoff: DEFAULT_BACKOFF }
    }
}

/// Chat completion client with per-attempt timeout and fixed-backoff retry.
///
/// Any failure of an attempt (transport error, non-2xx status, timeout,
/// undecodable body) is retried until the budget is spent, after which the
/// last error is returned unchanged. The client holds no state between
/// calls.
pub struct ChatCompletionClient<C> {
    inner: C,
    policy: RetryPolicy,
    observer: Box<dyn AttemptObserver>,
}

impl<C: LlmClient> ChatCompletionClient<C> {
    /// Wraps `inner` with the given retry policy and no progress output.
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy, observer: Box::new(SilentObserver) }
    }

    /// Reports attempt boundaries to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: impl AttemptObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns the active retry policy.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Sends `request`, retrying failed attempts.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt once `max_retries` retries
    /// have failed.
    pub async fn request_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let mut attempt = 0;
        loop {
            self.observer.on_attempt_start(attempt, request);
            debug!(attempt, "chat completion attempt");

            match with_timeout(self.policy.timeout, self.inner.complete(request)).await {
                Ok(response) => {
                    if attempt > 0 {
                        debug!(attempts = attempt + 1, "chat completion succeeded after retries");
                    }
                    self.observer.on_success(attempt, &response);
                    return Ok(response);
                }
                Err(error) => {
                    self.observer.on_failure(attempt, &error);

                    if attempt >= self.policy.max_retries {
                        debug!(attempts = attempt + 1, error = %error, "chat completion failed, giving up");
                        return Err(error);
                    }

                    attempt += 1;
                    // Operator-facing retry output belongs to the observer.
                    debug!(
                        attempt,
                        backoff_ms = self.policy.backoff.as_millis(),
                        error = %error,
                        "chat completion failed, retrying"
                    );
                    self.observer.on_retry(attempt, self.policy.max_retries, self.policy.backoff);
                    delay(self.policy.backoff).await;
                }
            }
        }
    }
}

impl<C: LlmClient> LlmClient for ChatCompletionClient<C> {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move { self.request_chat_completion(&request).await })
    }
}
