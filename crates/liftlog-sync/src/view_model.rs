//! Observable projection of the log for a presentation layer.
//!
//! The view model never polls. A background task waits on the store's change
//! counter and re-reads the projection after every committed write, so an
//! entry turning `synced` shows up without the UI asking.

use std::sync::Arc;

use liftlog_core::entities::WorkoutLogEntry;
use liftlog_core::enums::TimeOrder;
use liftlog_db::error::DatabaseError;
use liftlog_db::service::LogStore;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::coordinator::{SyncCoordinator, SyncReport};
use crate::error::{SyncError, WriteError};
use crate::uploader::RemoteUploader;
use crate::write_path::WorkoutLogger;

/// Snapshot published to observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogViewState {
    /// Every entry, newest first.
    pub entries: Vec<WorkoutLogEntry>,
    /// Whether at least one entry is `pending`.
    pub sync_needed: bool,
    /// Whether a sync triggered through this view model is running.
    pub syncing: bool,
    /// Result of the last completed sync triggered here.
    pub last_report: Option<SyncReport>,
    /// Last refresh failure, cleared by the next successful refresh.
    pub last_error: Option<String>,
    /// Store change counter the projection was read at.
    pub store_version: u64,
}

/// Presentation-facing facade over the write path and the coordinator.
pub struct LogViewModel<U> {
    store: Arc<LogStore>,
    logger: WorkoutLogger,
    coordinator: Arc<SyncCoordinator<U>>,
    state: Arc<watch::Sender<LogViewState>>,
    sync_gate: Mutex<()>,
    refresher: JoinHandle<()>,
}

impl<U: RemoteUploader + 'static> LogViewModel<U> {
    /// Load the initial projection and start following store changes.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the initial projection cannot be read.
    pub async fn new(coordinator: Arc<SyncCoordinator<U>>) -> Result<Self, DatabaseError> {
        let store = Arc::clone(coordinator.store());
        let (state, _) = watch::channel(LogViewState::default());
        let state = Arc::new(state);

        // Subscribe before the first read so no change slips in between.
        let changes = store.subscribe();
        load_projection(&store, &state).await?;
        let refresher = tokio::spawn(follow_changes(
            Arc::clone(&store),
            Arc::clone(&state),
            changes,
        ));

        Ok(Self {
            logger: WorkoutLogger::new(Arc::clone(&store)),
            store,
            coordinator,
            state,
            sync_gate: Mutex::new(()),
            refresher,
        })
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn state(&self) -> LogViewState {
        self.state.borrow().clone()
    }

    /// Receive every future snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LogViewState> {
        self.state.subscribe()
    }

    /// Re-read the projection now instead of waiting for the next push.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be read; the failure is
    /// also published in `last_error`.
    pub async fn refresh(&self) -> Result<(), DatabaseError> {
        load_projection(&self.store, &self.state).await
    }

    /// Log a workout. The returned entry is in the projection on return.
    ///
    /// # Errors
    ///
    /// Same as [`WorkoutLogger::log_workout`].
    pub async fn log_workout(
        &self,
        exercise_name: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<WorkoutLogEntry, WriteError> {
        let entry = self
            .logger
            .log_workout(exercise_name, sets, reps, weight)
            .await?;
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "view refresh after write failed");
        }
        Ok(entry)
    }

    /// Run one sync pass. `syncing` is set for the duration.
    ///
    /// # Errors
    ///
    /// Same as [`SyncCoordinator::run_sync`].
    pub async fn trigger_sync(&self) -> Result<SyncReport, SyncError> {
        let _gate = self.sync_gate.lock().await;
        let _syncing = SyncingFlag::raise(&self.state);

        let result = self.coordinator.run_sync().await;
        if let Ok(report) = &result {
            let report = *report;
            self.state.send_modify(|s| s.last_report = Some(report));
        }
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "view refresh after sync failed");
        }
        result
    }

    /// Re-enqueue every `failed` entry. Returns how many moved.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Store` if the store update fails.
    pub async fn retry_failed(&self) -> Result<u64, SyncError> {
        let moved = self.coordinator.retry_failed().await?;
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "view refresh after retry failed");
        }
        Ok(moved)
    }
}

impl<U> Drop for LogViewModel<U> {
    fn drop(&mut self) {
        self.refresher.abort();
    }
}

/// Keeps `syncing` raised until dropped, including on error or cancellation.
struct SyncingFlag<'a> {
    state: &'a watch::Sender<LogViewState>,
}

impl<'a> SyncingFlag<'a> {
    fn raise(state: &'a watch::Sender<LogViewState>) -> Self {
        state.send_modify(|s| s.syncing = true);
        Self { state }
    }
}

impl Drop for SyncingFlag<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.syncing = false);
    }
}

async fn follow_changes(
    store: Arc<LogStore>,
    state: Arc<watch::Sender<LogViewState>>,
    mut changes: watch::Receiver<u64>,
) {
    while changes.changed().await.is_ok() {
        changes.borrow_and_update();
        if let Err(e) = load_projection(&store, &state).await {
            tracing::warn!(error = %e, "view refresh failed");
        }
    }
}

/// Read entries and the pending flag, then publish unless a newer read won.
async fn load_projection(
    store: &LogStore,
    state: &watch::Sender<LogViewState>,
) -> Result<(), DatabaseError> {
    let version = store.version();
    let read = async {
        let entries = store.all_ordered_by_time(TimeOrder::Descending).await?;
        let sync_needed = store.has_pending().await?;
        Ok::<_, DatabaseError>((entries, sync_needed))
    };

    match read.await {
        Ok((entries, sync_needed)) => {
            state.send_if_modified(|s| {
                if version < s.store_version {
                    return false;
                }
                s.entries = entries;
                s.sync_needed = sync_needed;
                s.last_error = None;
                s.store_version = version;
                true
            });
            Ok(())
        }
        Err(e) => {
            state.send_modify(|s| s.last_error = Some(e.to_string()));
            Err(e)
        }
    }
}
