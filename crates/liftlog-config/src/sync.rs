//! Sync coordinator and background loop configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

const fn default_upload_timeout_ms() -> u64 {
    10_000
}

const fn default_max_concurrent_uploads() -> usize {
    4
}

const fn default_interval_secs() -> u64 {
    300
}

const fn default_backoff_base_ms() -> u64 {
    1_000
}

const fn default_backoff_max_ms() -> u64 {
    300_000
}

const fn default_auto_retry_failed() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Upper bound on a single upload before it counts as a timeout.
    #[serde(default = "default_upload_timeout_ms")]
    pub upload_timeout_ms: u64,

    /// How many uploads one sync run keeps in flight.
    #[serde(default = "default_max_concurrent_uploads")]
    pub max_concurrent_uploads: usize,

    /// Pause between successful background sync runs, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// First backoff delay after a failed background run.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Backoff ceiling.
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,

    /// Re-enqueue failed entries before every background run.
    #[serde(default = "default_auto_retry_failed")]
    pub auto_retry_failed: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upload_timeout_ms: default_upload_timeout_ms(),
            max_concurrent_uploads: default_max_concurrent_uploads(),
            interval_secs: default_interval_secs(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: default_backoff_max_ms(),
            auto_retry_failed: default_auto_retry_failed(),
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub const fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    #[must_use]
    pub const fn backoff_max(&self) -> Duration {
        Duration::from_millis(self.backoff_max_ms)
    }

    /// Reject values that would stall or spin the sync loop.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero timeouts, zero concurrency,
    /// or a backoff ceiling below its base.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.upload_timeout_ms == 0, "sync.upload_timeout_ms", "must be greater than 0"),
            (
                self.max_concurrent_uploads == 0,
                "sync.max_concurrent_uploads",
                "must be greater than 0",
            ),
            (self.interval_secs == 0, "sync.interval_secs", "must be greater than 0"),
            (self.backoff_base_ms == 0, "sync.backoff_base_ms", "must be greater than 0"),
            (
                self.backoff_max_ms < self.backoff_base_ms,
                "sync.backoff_max_ms",
                "must not be smaller than sync.backoff_base_ms",
            ),
        ];
        for (failed, field, reason) in checks {
            if failed {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }
}
