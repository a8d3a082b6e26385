//! Sync status transitions.
//!
//! Each transition is one conditional UPDATE whose `WHERE` clause lists the
//! legal source states, so concurrent attempts on the same id serialize in
//! `SQLite` and at most one of them can succeed.

use liftlog_core::enums::SyncStatus;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_status, now_micros, source_codes_sql};
use crate::service::LogStore;

impl LogStore {
    /// Record that the remote store durably accepted the entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for unknown ids and
    /// `DatabaseError::IllegalTransition` unless the entry is `pending`.
    pub async fn mark_synced(&self, id: &str) -> Result<(), DatabaseError> {
        self.transition(id, SyncStatus::Synced, None).await
    }

    /// Record that an upload attempt failed, keeping `reason` in the history.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for unknown ids and
    /// `DatabaseError::IllegalTransition` unless the entry is `pending`.
    pub async fn mark_failed(&self, id: &str, reason: &str) -> Result<(), DatabaseError> {
        self.transition(id, SyncStatus::Failed, Some(reason)).await
    }

    /// Move every `failed` entry back to `pending`. Returns how many moved.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails; no entry changes then.
    pub async fn retry_failed(&self) -> Result<u64, DatabaseError> {
        let _guard = self.lock_writes().await;
        let now = format_timestamp(now_micros());
        let moved = self
            .db()
            .conn()
            .execute(
                "UPDATE workout_logs SET sync_status = ?1, updated_at = ?2 WHERE sync_status = ?3",
                libsql::params![
                    SyncStatus::Pending.code(),
                    now.as_str(),
                    SyncStatus::Failed.code()
                ],
            )
            .await?;

        if moved > 0 {
            self.notify_changed();
            tracing::info!(count = moved, "failed entries re-enqueued");
        }
        Ok(moved)
    }

    async fn transition(
        &self,
        id: &str,
        to: SyncStatus,
        reason: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let _guard = self.lock_writes().await;
        let now = format_timestamp(now_micros());
        let sources = source_codes_sql(to);
        let changed = self
            .db()
            .conn()
            .execute(
                &format!(
                    "UPDATE workout_logs SET sync_status = ?1, last_sync_error = ?2, updated_at = ?3 \
                     WHERE id = ?4 AND sync_status IN ({sources})"
                ),
                libsql::params![to.code(), reason, now.as_str(), id],
            )
            .await?;

        if changed == 0 {
            return Err(self.explain_rejected_transition(id, to).await);
        }

        self.notify_changed();
        tracing::debug!(entry_id = id, %to, "sync status updated");
        Ok(())
    }

    /// Work out why a conditional UPDATE matched no row.
    ///
    /// Called with the write lock held, so the status read is the one the
    /// UPDATE saw.
    async fn explain_rejected_transition(&self, id: &str, to: SyncStatus) -> DatabaseError {
        let lookup = async {
            let mut rows = self
                .db()
                .conn()
                .query("SELECT sync_status FROM workout_logs WHERE id = ?1", [id])
                .await?;
            match rows.next().await? {
                Some(row) => Ok::<_, DatabaseError>(Some(get_status(&row, 0)?)),
                None => Ok(None),
            }
        };

        match lookup.await {
            Ok(Some(from)) => DatabaseError::IllegalTransition {
                id: id.to_string(),
                from,
                to,
            },
            Ok(None) => DatabaseError::NotFound { id: id.to_string() },
            Err(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{squat, test_store};

    #[tokio::test]
    async fn pending_to_synced() {
        let store = test_store().await;
        let entry = store.insert(&squat()).await.unwrap();

        store.mark_synced(&entry.id).await.unwrap();
        let fetched = store.get_entry(&entry.id).await.unwrap();
        assert_eq!(fetched.sync_status, SyncStatus::Synced);
        assert!(store.pending_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pending_to_failed_leaves_pending_set() {
        let store = test_store().await;
        let entry = store.insert(&squat()).await.unwrap();

        store.mark_failed(&entry.id, "rejected: 422").await.unwrap();
        assert_eq!(
            store.get_entry(&entry.id).await.unwrap().sync_status,
            SyncStatus::Failed
        );
        assert!(store.pending_entries().await.unwrap().is_empty());
        assert_eq!(store.failed_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn synced_is_terminal() {
        let store = test_store().await;
        let entry = store.insert(&squat()).await.unwrap();
        store.mark_synced(&entry.id).await.unwrap();

        let err = store.mark_failed(&entry.id, "late timeout").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::IllegalTransition {
                from: SyncStatus::Synced,
                to: SyncStatus::Failed,
                ..
            }
        ));

        let err = store.mark_synced(&entry.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::IllegalTransition { .. }));

        assert_eq!(store.retry_failed().await.unwrap(), 0);
        assert_eq!(
            store.get_entry(&entry.id).await.unwrap().sync_status,
            SyncStatus::Synced
        );
    }

    #[tokio::test]
    async fn failed_cannot_be_marked_synced_directly() {
        let store = test_store().await;
        let entry = store.insert(&squat()).await.unwrap();
        store.mark_failed(&entry.id, "timeout").await.unwrap();

        let err = store.mark_synced(&entry.id).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::IllegalTransition {
                from: SyncStatus::Failed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = test_store().await;
        let err = store.mark_synced("wkl-ffffffffffffffff").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { ref id } if id == "wkl-ffffffffffffffff"));
        assert!(!err.is_persistence());
    }

    #[tokio::test]
    async fn rejected_transition_does_not_notify() {
        let store = test_store().await;
        let entry = store.insert(&squat()).await.unwrap();
        store.mark_synced(&entry.id).await.unwrap();
        let version = store.version();

        let _ = store.mark_failed(&entry.id, "nope").await;
        assert_eq!(store.version(), version);
    }

    #[tokio::test]
    async fn retry_failed_moves_all_and_only_failed() {
        let store = test_store().await;
        let synced = store.insert(&squat()).await.unwrap();
        let failed_a = store.insert(&squat()).await.unwrap();
        let failed_b = store.insert(&squat()).await.unwrap();
        let pending = store.insert(&squat()).await.unwrap();

        store.mark_synced(&synced.id).await.unwrap();
        store.mark_failed(&failed_a.id, "timeout").await.unwrap();
        store.mark_failed(&failed_b.id, "rejected").await.unwrap();

        assert_eq!(store.retry_failed().await.unwrap(), 2);

        let pending_ids: Vec<String> = store
            .pending_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(pending_ids, vec![failed_a.id, failed_b.id, pending.id]);
        assert_eq!(
            store.get_entry(&synced.id).await.unwrap().sync_status,
            SyncStatus::Synced
        );
    }

    #[tokio::test]
    async fn retry_failed_without_failures_is_noop() {
        let store = test_store().await;
        store.insert(&squat()).await.unwrap();
        let version = store.version();

        assert_eq!(store.retry_failed().await.unwrap(), 0);
        assert_eq!(store.version(), version);
    }
}
