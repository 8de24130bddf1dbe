//! Retry executor with exponential backoff.
//!
//! Wraps an arbitrary asynchronous operation and re-invokes it after
//! failures, waiting an exponentially growing delay between attempts.
//! Attempts run strictly sequentially, never concurrently. No jitter is
//! added; callers sensitive to thundering-herd effects add it externally.

use crate::error::{ProviderError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration.
///
/// The delay before attempt *n* (0-indexed retries, n ≥ 1) is
/// `base_delay * 2^(n-1)`, capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay. Use `Duration::MAX` for uncapped.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before the given attempt (1-indexed retry number).
    fn delay_before(&self, attempt: u32) -> Duration {
        let exponent = (attempt - 1).min(31);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error,
/// or `policy.max_attempts` consecutive failures have accumulated.
///
/// Non-retryable errors (anything but
/// [`ProviderError::UpstreamUnavailable`]) surface immediately: a
/// malformed payload is not going to parse on the second download.
///
/// # Errors
///
/// Returns [`ProviderError::RetryExhausted`] carrying the most recent
/// error once all attempts are spent.
pub async fn execute<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error: Option<ProviderError> = None;

    for attempt in 0..policy.max_attempts {
        if attempt > 0 {
            let delay = policy.delay_before(attempt);
            debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying after delay");
            sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                warn!(attempt = attempt + 1, error = %e, "Attempt failed");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(ProviderError::RetryExhausted {
        attempts: policy.max_attempts,
        source: Box::new(
            last_error.unwrap_or_else(|| {
                ProviderError::UpstreamUnavailable("no attempt was made".to_string())
            }),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(20),
            max_delay: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(3),
        };

        assert_eq!(policy.delay_before(1), Duration::from_secs(1));
        assert_eq!(policy.delay_before(2), Duration::from_secs(2));
        assert_eq!(policy.delay_before(3), Duration::from_secs(3));
        assert_eq!(policy.delay_before(4), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_exhaustion_invokes_exactly_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let start = Instant::now();

        let result: Result<()> = execute(&fast_policy(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::UpstreamUnavailable("boom".to_string()))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Delays of base then 2*base must have elapsed.
        assert!(start.elapsed() >= Duration::from_millis(60));

        match result {
            Err(ProviderError::RetryExhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, ProviderError::UpstreamUnavailable(_)));
            }
            other => panic!("expected RetryExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_on_second_attempt_stops_retrying() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = execute(&fast_policy(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ProviderError::UpstreamUnavailable("first".to_string()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<()> = execute(&fast_policy(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::MalformedResponse("missing field".to_string()))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_immediate_success_makes_one_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = execute(&fast_policy(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
