//! Backoff schedule for rate-limited submissions

use crate::config::IndexNowConfig;
use std::time::Duration;

/// Retry policy applied to HTTP 429 responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first request
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each later one
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (zero-based): `base × 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Sum of every delay the policy can impose
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| self.delay_for(attempt))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(1))
    }
}

impl From<&IndexNowConfig> for RetryPolicy {
    fn from(config: &IndexNowConfig) -> Self {
        Self::new(config.max_retries, Duration::from_millis(config.base_delay_ms))
    }
}
