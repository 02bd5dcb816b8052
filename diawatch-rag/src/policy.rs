//! Retry policy: which failures to retry and how long to wait.

use std::time::Duration;

use crate::error::RagError;

/// HTTP statuses that indicate a transient upstream problem.
const RETRYABLE_STATUSES: [u16; 5] = [500, 502, 503, 504, 429];

/// Retry configuration for calls to the RAG service.
///
/// The worst-case time a call can block is
/// `timeout * (max_retries + 1) + backoff_factor * (2^max_retries - 1)` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,

    /// Multiplier for the exponential backoff delay, in seconds.
    pub backoff_factor: f64,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Check whether an HTTP status should trigger a retry.
    ///
    /// True for 5xx gateway/server failures and 429; false for every other
    /// 4xx, which indicates a request the service will keep rejecting.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Check whether an error is worth retrying.
    pub fn should_retry(&self, error: &RagError) -> bool {
        match error {
            RagError::Timeout | RagError::Connection(_) => true,
            RagError::Http { status } => self.is_retryable_status(*status),
            RagError::Parse(_) | RagError::Unknown(_) => false,
        }
    }

    /// Backoff delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.backoff_factor * f64::from(1u32 << attempt.min(31)))
    }

    /// Total sleep time if every retry is used.
    pub fn max_total_delay(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| self.delay_for(attempt))
            .sum()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 0.5,
            timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_retries, 3);
        assert_eq!(p.backoff_factor, 0.5);
        assert_eq!(p.timeout, Duration::from_secs(60));
    }

    #[test]
    fn retryable_statuses() {
        let p = RetryPolicy::default();
        for status in [500, 502, 503, 504, 429] {
            assert!(p.is_retryable_status(status), "{status} should retry");
        }
    }

    #[test]
    fn non_retryable_statuses() {
        let p = RetryPolicy::default();
        for status in [400, 401, 403, 404, 418, 422, 301] {
            assert!(!p.is_retryable_status(status), "{status} should not retry");
        }
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(0), Duration::from_millis(500));
        assert_eq!(p.delay_for(1), Duration::from_secs(1));
        assert_eq!(p.delay_for(2), Duration::from_secs(2));
        assert_eq!(p.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn max_total_delay_is_geometric_sum() {
        let p = RetryPolicy::default();
        // 0.5 + 1 + 2 = backoff_factor * (2^3 - 1)
        assert_eq!(p.max_total_delay(), Duration::from_secs_f64(3.5));
    }

    #[test]
    fn should_retry_by_category() {
        let p = RetryPolicy::default();
        assert!(p.should_retry(&RagError::Timeout));
        assert!(p.should_retry(&RagError::Connection("refused".into())));
        assert!(p.should_retry(&RagError::Http { status: 503 }));
        assert!(!p.should_retry(&RagError::Http { status: 404 }));
        assert!(!p.should_retry(&RagError::Parse("bad json".into())));
        assert!(!p.should_retry(&RagError::Unknown("?".into())));
    }
}
