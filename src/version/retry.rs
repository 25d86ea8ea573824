//! Retry budget and backoff for probes

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::config::ProbeConfig;

/// Attempt budget with linear backoff
///
/// Attempt `k` (zero-based) is preceded by a sleep of `k * backoff_step`,
/// so the default policy waits 0s, 2s, 4s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    /// Delay to wait before the given zero-based attempt
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ProbeConfig::default())
    }
}

impl From<&ProbeConfig> for RetryPolicy {
    fn from(config: &ProbeConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.backoff_step_ms),
        )
    }
}

/// Waits between attempts
///
/// Injected so tests can observe the backoff curve without sleeping.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
