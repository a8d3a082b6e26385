//! Sync transition history.
//!
//! Rows in `sync_events` are written by a trigger in the same statement as
//! the status change, so the history never disagrees with the entry.

use liftlog_core::entities::SyncEvent;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_status, parse_datetime};
use crate::service::LogStore;

fn row_to_event(row: &libsql::Row) -> Result<SyncEvent, DatabaseError> {
    Ok(SyncEvent {
        entry_id: row.get(0)?,
        from_status: get_status(row, 1)?,
        to_status: get_status(row, 2)?,
        reason: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl LogStore {
    /// Status changes of one entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the entry does not exist.
    pub async fn sync_history(&self, id: &str) -> Result<Vec<SyncEvent>, DatabaseError> {
        self.get_entry(id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT entry_id, from_status, to_status, reason, created_at \
                 FROM sync_events WHERE entry_id = ?1 ORDER BY seq",
                [id],
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }
}
