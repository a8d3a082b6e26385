//! Backoff between failed background sync runs.
//!
//! A run fails as a whole only when the store cannot be read or every upload
//! came back unreachable. Both usually clear up on their own (storage
//! contention, the device coming back online), so the background loop keeps
//! trying with an exponentially growing delay instead of giving up.

use std::time::Duration;

use liftlog_config::SyncConfig;

/// Exponential backoff configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay after the first failure.
    pub base_delay: Duration,
    /// Maximum delay between attempts (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn from_config(config: &SyncConfig) -> Self {
        Self {
            base_delay: config.backoff_base(),
            max_delay: config.backoff_max(),
        }
    }

    /// Delay after `consecutive_failures` failed runs in a row.
    ///
    /// `base * 2^(n-1)`, capped at `max_delay`. Zero failures means no delay.
    #[must_use]
    pub fn delay_for(&self, consecutive_failures: u32) -> Duration {
        if consecutive_failures == 0 {
            return Duration::ZERO;
        }
        let factor = 1_u32
            .checked_shl(consecutive_failures - 1)
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
