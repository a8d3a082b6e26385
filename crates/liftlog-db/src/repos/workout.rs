//! Workout log repository: insert, lookups, ordered history, status queries.

use liftlog_core::entities::WorkoutLogEntry;
use liftlog_core::enums::{SyncStatus, TimeOrder};
use liftlog_core::ids::PREFIX_WORKOUT;
use liftlog_core::validation::NewWorkout;
use serde::Serialize;

use crate::cursor::EntryCursor;
use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_status, get_u32, now_micros, parse_datetime};
use crate::service::LogStore;

const SELECT_COLS: &str = "id, exercise_name, sets, reps, weight, timestamp, sync_status";

pub(crate) fn row_to_entry(row: &libsql::Row) -> Result<WorkoutLogEntry, DatabaseError> {
    Ok(WorkoutLogEntry {
        id: row.get(0)?,
        exercise_name: row.get(1)?,
        sets: get_u32(row, 2)?,
        reps: get_u32(row, 3)?,
        weight: row.get::<f64>(4)?,
        timestamp: parse_datetime(&row.get::<String>(5)?)?,
        sync_status: get_status(row, 6)?,
    })
}

/// Number of entries in each sync status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub synced: u64,
    pub failed: u64,
}

impl StatusCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pending + self.synced + self.failed
    }

    /// Entries the user would see as "not yet synced".
    #[must_use]
    pub const fn unsynced(&self) -> u64 {
        self.pending + self.failed
    }
}

impl LogStore {
    /// Persist a validated workout as a new `pending` entry.
    ///
    /// The returned entry carries the generated id and the creation timestamp.
    /// The write is committed before this returns.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if ID generation or the INSERT fails; nothing
    /// is stored in that case.
    pub async fn insert(&self, workout: &NewWorkout) -> Result<WorkoutLogEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_WORKOUT).await?;
        let _guard = self.lock_writes().await;
        let now = now_micros();
        let ts = format_timestamp(now);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO workout_logs ({SELECT_COLS}, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    workout.exercise_name(),
                    i64::from(workout.sets()),
                    i64::from(workout.reps()),
                    workout.weight(),
                    ts.as_str(),
                    SyncStatus::Pending.code(),
                    ts.as_str()
                ],
            )
            .await?;

        self.notify_changed();
        tracing::debug!(
            entry_id = %id,
            exercise = workout.exercise_name(),
            "workout entry inserted"
        );

        Ok(WorkoutLogEntry {
            id,
            exercise_name: workout.exercise_name().to_string(),
            sets: workout.sets(),
            reps: workout.reps(),
            weight: workout.weight(),
            timestamp: now,
            sync_status: SyncStatus::Pending,
        })
    }

    /// Fetch a single entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no entry has this id.
    pub async fn get_entry(&self, id: &str) -> Result<WorkoutLogEntry, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM workout_logs WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::NotFound { id: id.to_string() })?;
        row_to_entry(&row)
    }

    /// Open a lazy cursor over every entry ordered by workout timestamp.
    ///
    /// Entries with the same timestamp keep insertion order (reversed for
    /// descending). Each call starts a fresh query.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query cannot be started.
    pub async fn entries_ordered_by_time(
        &self,
        order: TimeOrder,
    ) -> Result<EntryCursor, DatabaseError> {
        let dir = order.as_sql();
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM workout_logs ORDER BY timestamp {dir}, rowid {dir}"
                ),
                (),
            )
            .await?;
        Ok(EntryCursor::new(rows))
    }

    /// Every entry ordered by workout timestamp, collected eagerly.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or any row decode fails.
    pub async fn all_ordered_by_time(
        &self,
        order: TimeOrder,
    ) -> Result<Vec<WorkoutLogEntry>, DatabaseError> {
        self.entries_ordered_by_time(order).await?.collect(None).await
    }

    /// Every entry currently `pending`, oldest first.
    ///
    /// Always reads the database; there is no cache to go stale.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn pending_entries(&self) -> Result<Vec<WorkoutLogEntry>, DatabaseError> {
        self.entries_with_status(SyncStatus::Pending).await
    }

    /// Every entry currently `failed`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn failed_entries(&self) -> Result<Vec<WorkoutLogEntry>, DatabaseError> {
        self.entries_with_status(SyncStatus::Failed).await
    }

    /// Whether any entry is `pending`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn has_pending(&self) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT EXISTS (SELECT 1 FROM workout_logs WHERE sync_status = ?1)",
                [SyncStatus::Pending.code()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)? != 0)
    }

    /// Per-status entry counts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or an unknown status code
    /// is stored.
    pub async fn counts(&self) -> Result<StatusCounts, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT sync_status, COUNT(*) FROM workout_logs GROUP BY sync_status",
                (),
            )
            .await?;

        let mut counts = StatusCounts::default();
        while let Some(row) = rows.next().await? {
            let n = u64::try_from(row.get::<i64>(1)?)
                .map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))?;
            match get_status(&row, 0)? {
                SyncStatus::Pending => counts.pending = n,
                SyncStatus::Synced => counts.synced = n,
                SyncStatus::Failed => counts.failed = n,
            }
        }
        Ok(counts)
    }

    async fn entries_with_status(
        &self,
        status: SyncStatus,
    ) -> Result<Vec<WorkoutLogEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM workout_logs WHERE sync_status = ?1 \
                     ORDER BY timestamp ASC, rowid ASC"
                ),
                [status.code()],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        tracing::debug!(%status, count = entries.len(), "entries loaded by status");
        Ok(entries)
    }
}
