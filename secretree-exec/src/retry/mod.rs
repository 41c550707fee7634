mod config;
mod decision;

use std::future::Future;

use secretree_store::StoreError;
use tracing::{debug, warn};

use crate::error::SecretsError;

pub use config::RetryConfig;
pub use decision::{decide_retry, RetryDecision, RetryReason};

/// Run `op`, retrying rate-limited failures per `cfg`.
///
/// Exhausting the attempts yields [`SecretsError::RateLimitExceeded`]; any
/// other store error is returned unchanged on first occurrence.
pub async fn with_rate_limit_retry<T, F, Fut>(cfg: &RetryConfig, what: &str, mut op: F) -> Result<T, SecretsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut attempt_no = 0;
    loop {
        attempt_no += 1;
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        match decide_retry(cfg, attempt_no, &err) {
            RetryDecision::RetryAfter { delay } => {
                debug!(what, attempt_no, delay_ms = delay.as_millis() as u64, "rate limited, retrying");
                tokio::time::sleep(delay).await;
            }
            RetryDecision::Stop {
                reason: RetryReason::AttemptsExhausted,
            } => {
                warn!(what, attempts = attempt_no, "rate limit retries exhausted");
                return Err(SecretsError::RateLimitExceeded {
                    attempts: attempt_no,
                    message: err.message().to_string(),
                });
            }
            RetryDecision::Stop {
                reason: RetryReason::NotRetryable,
            } => return Err(err.into()),
        }
    }
}
