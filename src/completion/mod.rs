//! Chat completion client: per-attempt timeout with bounded, fixed-backoff retry.
//!
//! The single-attempt transport is any [`LlmClient`](crate::ports::LlmClient);
//! [`ChatCompletionClient`] layers the retry loop on top and reports each
//! attempt boundary to an [`AttemptObserver`].

pub mod observer;
pub mod retry;
pub mod timing;

pub use observer::{AttemptObserver, ConsoleObserver, SilentObserver};
pub use retry::{ChatCompletionClient, RetryPolicy, DEFAULT_BACKOFF, DEFAULT_TIMEOUT, MAX_RETRIES};
pub use timing::{delay, with_timeout};
