//! Bounded retry for reads against a transiently unreachable backend
//!
//! Only failures where no response was received qualify. Authorization and
//! validation failures, and server error responses, always surface on the
//! first attempt.

use crate::client::error::ClientError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry bounds applied to list reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait before the first retry; doubles for each retry after
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, completed_attempts: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(completed_attempts.saturating_sub(1))
    }
}

/// Run `operation` until it succeeds, fails with a non-network error, or the
/// attempt budget is spent
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts && error.is_network() => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    "backend unreachable, retrying: {error}"
                );
                tokio::time::sleep(policy.delay_for(attempt)).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_per_retry() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn non_network_errors_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry(RetryPolicy::default(), || {
            calls += 1;
            async { Err(ClientError::NotFound("missing".into())) }
        })
        .await;

        assert!(matches!(result, Err(ClientError::NotFound(_))));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn success_short_circuits() {
        let mut calls = 0;
        let result = with_retry(RetryPolicy::default(), || {
            calls += 1;
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }
}
