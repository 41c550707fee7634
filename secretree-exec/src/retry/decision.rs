use std::time::Duration;

use secretree_store::StoreError;

use crate::retry::config::RetryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable,
    AttemptsExhausted,
}

/// Decide whether a failed call should be tried again.
///
/// `attempt_no` is 1-based. Only rate-limit errors are retried.
pub fn decide_retry(cfg: &RetryConfig, attempt_no: usize, error: &StoreError) -> RetryDecision {
    if !error.is_rate_limited() {
        return RetryDecision::Stop {
            reason: RetryReason::NotRetryable,
        };
    }
    if attempt_no >= cfg.max_attempts.max(1) {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }
    RetryDecision::RetryAfter { delay: cfg.delay }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttled() -> StoreError {
        StoreError::RateLimited("Rate exceeded".into())
    }

    #[test]
    fn retries_rate_limit_until_last_attempt() {
        let cfg = RetryConfig::default();
        assert_eq!(
            decide_retry(&cfg, 1, &throttled()),
            RetryDecision::RetryAfter {
                delay: Duration::from_millis(1050)
            }
        );
        assert_eq!(
            decide_retry(&cfg, 2, &throttled()),
            RetryDecision::RetryAfter {
                delay: Duration::from_millis(1050)
            }
        );
        assert_eq!(
            decide_retry(&cfg, 3, &throttled()),
            RetryDecision::Stop {
                reason: RetryReason::AttemptsExhausted
            }
        );
    }

    #[test]
    fn other_errors_are_not_retried() {
        let cfg = RetryConfig::default();
        let err = StoreError::AccessDenied("denied".into());
        assert_eq!(
            decide_retry(&cfg, 1, &err),
            RetryDecision::Stop {
                reason: RetryReason::NotRetryable
            }
        );
    }

    #[test]
    fn zero_attempts_behaves_like_one() {
        let cfg = RetryConfig {
            max_attempts: 0,
            delay: Duration::ZERO,
        };
        assert_eq!(
            decide_retry(&cfg, 1, &throttled()),
            RetryDecision::Stop {
                reason: RetryReason::AttemptsExhausted
            }
        );
    }
}
