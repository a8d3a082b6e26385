//! The reference scenario: log, sync, fail, retry, all through the view model.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::SwitchableUploader;
use liftlog_core::enums::SyncStatus;
use liftlog_db::service::LogStore;
use liftlog_sync::{LogViewModel, SyncCoordinator, SyncReport, UploadOutcome};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn squat_then_timeout_then_retry() {
    let store = Arc::new(LogStore::open_local(":memory:").await.unwrap());
    let uploader = SwitchableUploader::new(UploadOutcome::Accepted);
    let coordinator = Arc::new(SyncCoordinator::with_limits(
        Arc::clone(&store),
        uploader.clone(),
        Duration::from_secs(5),
        4,
    ));
    let vm = LogViewModel::new(coordinator).await.unwrap();

    // 1. Log a squat: one pending entry.
    let squat = vm.log_workout("Squat", 4, 8, 60.0).await.unwrap();
    let state = vm.state();
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.entries[0].sync_status, SyncStatus::Pending);
    assert!(state.sync_needed);

    // 2. Sync with an accepting remote.
    let report = vm.trigger_sync().await.unwrap();
    assert_eq!(
        report,
        SyncReport {
            attempted: 1,
            succeeded: 1,
            failed: 0,
            cancelled: 0
        }
    );
    assert_eq!(
        store.get_entry(&squat.id).await.unwrap().sync_status,
        SyncStatus::Synced
    );
    assert!(!vm.state().sync_needed);

    // 3. A second entry whose upload times out.
    let bench = vm.log_workout("Bench Press", 3, 5, 80.0).await.unwrap();
    uploader.set(UploadOutcome::Timeout);
    let report = vm.trigger_sync().await.unwrap();
    assert_eq!((report.attempted, report.failed), (1, 1));
    assert_eq!(
        store.get_entry(&bench.id).await.unwrap().sync_status,
        SyncStatus::Failed
    );
    assert!(!vm.state().sync_needed);

    // The synced squat was never uploaded again.
    assert_eq!(uploader.uploaded(), vec![squat.id.clone(), bench.id.clone()]);

    // 4. Retry makes it pending again.
    assert_eq!(vm.retry_failed().await.unwrap(), 1);
    assert!(vm.state().sync_needed);

    // 5. And the next accepted sync settles it.
    uploader.set(UploadOutcome::Accepted);
    let report = vm.trigger_sync().await.unwrap();
    assert_eq!(report.succeeded, 1);
    let state = vm.state();
    assert!(!state.sync_needed);
    assert!(
        state
            .entries
            .iter()
            .all(|e| e.sync_status == SyncStatus::Synced)
    );
}

#[tokio::test]
async fn synced_entry_survives_later_failures() {
    let store = Arc::new(LogStore::open_local(":memory:").await.unwrap());
    let uploader = SwitchableUploader::new(UploadOutcome::Accepted);
    let coordinator = Arc::new(SyncCoordinator::with_limits(
        Arc::clone(&store),
        uploader.clone(),
        Duration::from_secs(5),
        2,
    ));
    let vm = LogViewModel::new(Arc::clone(&coordinator)).await.unwrap();

    let squat = vm.log_workout("Squat", 4, 8, 60.0).await.unwrap();
    vm.trigger_sync().await.unwrap();

    uploader.set(UploadOutcome::Rejected("HTTP 500".into()));
    for _ in 0..3 {
        vm.log_workout("Lunge", 3, 12, 20.0).await.unwrap();
        vm.trigger_sync().await.unwrap();
        vm.retry_failed().await.unwrap();
    }

    assert_eq!(
        store.get_entry(&squat.id).await.unwrap().sync_status,
        SyncStatus::Synced
    );
    let history = store.sync_history(&squat.id).await.unwrap();
    assert_eq!(history.len(), 1);
}
