use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Fixed-delay retry policy.
///
/// The delay is the same between every pair of attempts. There is no
/// backoff and no jitter, so the timing of a failing operation is fully
/// determined by `max_attempts` and `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of invocations, including the first one.
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Single attempt, no delay.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Runs `operation` until it succeeds or `config.max_attempts` invocations
/// have failed. The last error is returned with the operation name attached
/// as context; the original error stays the root cause.
pub async fn with_retry<T, F, Fut>(
    config: RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if attempt >= attempts => {
                debug!("{} failed after {} attempts", operation_name, attempts);
                return Err(e).context(format!(
                    "{} failed after {} attempts",
                    operation_name, attempts
                ));
            }
            Err(e) => {
                debug!(
                    "{} failed (attempt {}/{}). Retrying in {:?}: {:#}",
                    operation_name,
                    attempt,
                    attempts,
                    config.delay(),
                    e
                );
                tokio::time::sleep(config.delay()).await;
                attempt += 1;
            }
        }
    }
}
