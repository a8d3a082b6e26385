//! Background loop that keeps the store reconciled.
//!
//! Each pass optionally re-enqueues `failed` entries, then runs the
//! coordinator. A successful pass waits the regular interval; a failed one
//! backs off exponentially until the next success.

use std::sync::Arc;
use std::time::Duration;

use liftlog_config::SyncConfig;
use tokio_util::sync::CancellationToken;

use crate::coordinator::{SyncCoordinator, SyncReport};
use crate::error::SyncError;
use crate::retry::RetryPolicy;
use crate::uploader::RemoteUploader;

/// Periodic driver for a [`SyncCoordinator`].
pub struct BackgroundSync<U> {
    coordinator: Arc<SyncCoordinator<U>>,
    interval: Duration,
    backoff: RetryPolicy,
    auto_retry_failed: bool,
}

impl<U: RemoteUploader> BackgroundSync<U> {
    #[must_use]
    pub fn new(coordinator: Arc<SyncCoordinator<U>>, config: &SyncConfig) -> Self {
        Self {
            coordinator,
            interval: config.interval(),
            backoff: RetryPolicy::from_config(config),
            auto_retry_failed: config.auto_retry_failed,
        }
    }

    /// Override the pause between successful passes.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the backoff applied after failed passes.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: RetryPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay before the next pass given how many passes failed in a row.
    #[must_use]
    pub fn next_delay(&self, consecutive_failures: u32) -> Duration {
        if consecutive_failures == 0 {
            self.interval
        } else {
            self.backoff.delay_for(consecutive_failures)
        }
    }

    /// Run passes until `token` is cancelled. Returns the number of passes.
    ///
    /// The first pass starts immediately. Cancellation interrupts both the
    /// wait and a running pass; uploads without an outcome stay `pending`.
    pub async fn run(&self, token: &CancellationToken) -> u64 {
        let mut passes = 0_u64;
        let mut consecutive_failures = 0_u32;

        while !token.is_cancelled() {
            passes += 1;
            match self.pass(token).await {
                Ok(report) => {
                    consecutive_failures = 0;
                    if !report.is_noop() {
                        tracing::info!(
                            pass = passes,
                            succeeded = report.succeeded,
                            failed = report.failed,
                            "background sync pass done"
                        );
                    }
                }
                Err(e) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    tracing::warn!(
                        pass = passes,
                        consecutive_failures,
                        error = %e,
                        "background sync pass failed"
                    );
                }
            }

            let delay = self.next_delay(consecutive_failures);
            tracing::debug!(delay_ms = delay.as_millis(), "next background sync pass scheduled");
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!(passes, "background sync stopped");
        passes
    }

    async fn pass(&self, token: &CancellationToken) -> Result<SyncReport, SyncError> {
        if self.auto_retry_failed {
            self.coordinator.retry_failed().await?;
        }
        self.coordinator.run_sync_until_cancelled(token).await
    }
}
