//! One reconciliation pass over the pending entries.
//!
//! The coordinator reads the pending set from the store, uploads each entry
//! independently, and records the outcome as a status transition. Entries
//! never depend on each other: one rejection does not stop the batch.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use liftlog_config::SyncConfig;
use liftlog_core::entities::WorkoutLogEntry;
use liftlog_core::enums::SyncStatus;
use liftlog_db::error::DatabaseError;
use liftlog_db::service::LogStore;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::SyncError;
use crate::uploader::{RemoteUploader, UploadOutcome};

/// Counts from one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Entries whose upload produced an outcome. Cancelled ones are not counted.
    pub attempted: usize,
    /// Entries now `synced`.
    pub succeeded: usize,
    /// Entries now `failed`, or whose outcome could not be recorded.
    pub failed: usize,
    /// Entries left `pending` because the run was cancelled first.
    pub cancelled: usize,
}

impl SyncReport {
    /// Whether the run had nothing to do.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.attempted == 0 && self.cancelled == 0
    }
}

/// How one entry ended up after a run.
enum Settled {
    Synced,
    Failed { unreachable: bool },
    Cancelled,
}

/// Drives uploads of pending entries and records their outcomes.
pub struct SyncCoordinator<U> {
    store: Arc<LogStore>,
    uploader: U,
    upload_timeout: Duration,
    max_concurrent_uploads: usize,
    run_lock: Mutex<()>,
}

impl<U: RemoteUploader> SyncCoordinator<U> {
    #[must_use]
    pub fn new(store: Arc<LogStore>, uploader: U, config: &SyncConfig) -> Self {
        Self::with_limits(
            store,
            uploader,
            config.upload_timeout(),
            config.max_concurrent_uploads,
        )
    }

    /// Build with explicit limits. A concurrency of 0 is treated as 1.
    #[must_use]
    pub fn with_limits(
        store: Arc<LogStore>,
        uploader: U,
        upload_timeout: Duration,
        max_concurrent_uploads: usize,
    ) -> Self {
        Self {
            store,
            uploader,
            upload_timeout,
            max_concurrent_uploads: max_concurrent_uploads.max(1),
            run_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    /// Upload every pending entry once and record each outcome.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Store` if the pending set cannot be read, and
    /// `SyncError::RemoteUnreachable` if every upload of a non-empty batch
    /// failed to reach the remote store (the entries are still recorded as
    /// `failed`).
    pub async fn run_sync(&self) -> Result<SyncReport, SyncError> {
        self.run_sync_until_cancelled(&CancellationToken::new()).await
    }

    /// Like [`run_sync`](Self::run_sync), stopping early when `token` fires.
    ///
    /// Uploads without an outcome when the token fires are abandoned and
    /// their entries stay `pending`. Transitions already recorded are kept.
    ///
    /// # Errors
    ///
    /// Same as [`run_sync`](Self::run_sync).
    pub async fn run_sync_until_cancelled(
        &self,
        token: &CancellationToken,
    ) -> Result<SyncReport, SyncError> {
        // Overlapping runs would upload the same pending entries twice.
        let _run = self.run_lock.lock().await;

        let pending = self.store.pending_entries().await?;
        if pending.is_empty() {
            tracing::debug!("sync run: nothing pending");
            return Ok(SyncReport::default());
        }

        let mut report = SyncReport::default();
        let mut unreachable = 0_usize;

        let uploads: Vec<_> = pending
            .iter()
            .map(|entry| self.sync_entry(entry, token))
            .collect();
        let mut settled =
            pin!(futures::stream::iter(uploads).buffer_unordered(self.max_concurrent_uploads));
        while let Some(outcome) = settled.next().await {
            match outcome {
                Settled::Synced => report.succeeded += 1,
                Settled::Failed { unreachable: true } => {
                    report.failed += 1;
                    unreachable += 1;
                }
                Settled::Failed { unreachable: false } => report.failed += 1,
                Settled::Cancelled => report.cancelled += 1,
            }
        }
        report.attempted = report.succeeded + report.failed;

        tracing::info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            cancelled = report.cancelled,
            "sync run finished"
        );

        if report.attempted > 0 && unreachable == report.attempted {
            return Err(SyncError::RemoteUnreachable {
                attempted: report.attempted,
            });
        }
        Ok(report)
    }

    /// Move every `failed` entry back to `pending`. Returns how many moved.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Store` if the store update fails.
    pub async fn retry_failed(&self) -> Result<u64, SyncError> {
        Ok(self.store.retry_failed().await?)
    }

    async fn sync_entry(&self, entry: &WorkoutLogEntry, token: &CancellationToken) -> Settled {
        let outcome = tokio::select! {
            biased;
            () = token.cancelled() => return Settled::Cancelled,
            outcome = self.upload_with_timeout(entry) => outcome,
        };

        // Past this point the outcome is known, so it is always recorded.
        let recorded = match outcome.failure_reason() {
            None => self.store.mark_synced(&entry.id).await,
            Some(reason) => {
                tracing::warn!(entry_id = %entry.id, %reason, "upload failed");
                self.store.mark_failed(&entry.id, &reason).await
            }
        };

        match recorded {
            Ok(()) if outcome.is_accepted() => Settled::Synced,
            Ok(()) => Settled::Failed {
                unreachable: matches!(outcome, UploadOutcome::Unreachable(_)),
            },
            // Another writer on the same database recorded the upload first.
            Err(DatabaseError::IllegalTransition {
                from: SyncStatus::Synced,
                ..
            }) => {
                tracing::debug!(entry_id = %entry.id, ?outcome, "entry already synced");
                Settled::Synced
            }
            Err(e) => {
                tracing::warn!(
                    entry_id = %entry.id,
                    ?outcome,
                    error = %e,
                    "could not record upload outcome"
                );
                Settled::Failed {
                    unreachable: matches!(outcome, UploadOutcome::Unreachable(_)),
                }
            }
        }
    }

    async fn upload_with_timeout(&self, entry: &WorkoutLogEntry) -> UploadOutcome {
        tokio::time::timeout(self.upload_timeout, self.uploader.upload(entry))
            .await
            .unwrap_or(UploadOutcome::Timeout)
    }
}
