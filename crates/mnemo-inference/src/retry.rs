//! Bounded retry with exponential backoff.
//!
//! Delays go through an injected [`Sleeper`] so tests can observe them with a
//! fake clock instead of waiting.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use mnemo_core::defaults::{REMOTE_BASE_DELAY_MS, REMOTE_MAX_ATTEMPTS};
use mnemo_core::{logging, Error, Result};

/// Passive wait between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How many attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: REMOTE_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(REMOTE_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Wait after the failed attempt with 0-based index `attempt_index`.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt_index))
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// Sleeps `delay_for(i)` after each failed attempt `i` except the last.
    /// Returns [`Error::RetriesExhausted`] carrying the final error message.
    pub async fn run<F, Fut, T>(&self, sleeper: &dyn Sleeper, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt_index = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt_index + 1 >= max_attempts => {
                    return Err(Error::RetriesExhausted {
                        attempts: max_attempts,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.delay_for(attempt_index);
                    warn!(
                        { logging::ATTEMPT } = attempt_index + 1,
                        { logging::MAX_ATTEMPTS } = max_attempts,
                        { logging::DELAY_MS } = delay.as_millis() as u64,
                        { logging::ERROR_MSG } = %e,
                        "Remote attempt failed, backing off"
                    );
                    sleeper.sleep(delay).await;
                    attempt_index += 1;
                }
            }
        }
    }
}
