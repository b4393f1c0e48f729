//! Delay and timeout helpers built on `tokio::time`.

use std::future::Future;
use std::time::Duration;

use crate::ports::llm::CompletionError;

/// Suspends the current task for `duration`.
///
/// Dropping the returned future cancels the wait.
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Runs `future` to completion unless `limit` elapses first.
///
/// On expiry the future is dropped, which aborts any in-flight request it
/// owns, and [`CompletionError::Timeout`] is returned.
///
/// # Errors
///
/// Returns the future's own error, or a timeout error.
pub async fn with_timeout<T, F>(limit: Duration, future: F) -> Result<T, CompletionError>
where
    F: Future<Output = Result<T, CompletionError>>,
{
    tokio::time::timeout(limit, future).await.map_err(|_| CompletionError::Timeout(limit))?
}
