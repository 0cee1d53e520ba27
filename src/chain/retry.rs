//! Retry logic utilities for chain source requests

use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use angor_indexer::chain::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run a request future with a timeout
///
/// The outer `Err` means the timeout elapsed; the inner value is the request's
/// own result, passed through untouched.
pub async fn execute_with_timeout<F, T>(timeout_seconds: u64, request: F) -> Result<T, Elapsed>
where
    F: Future<Output = T>,
{
    timeout(Duration::from_secs(timeout_seconds), request).await
}
