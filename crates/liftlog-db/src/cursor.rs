//! Lazy cursor over workout log entries.

use futures::Stream;
use liftlog_core::entities::WorkoutLogEntry;

use crate::error::DatabaseError;
use crate::repos::workout::row_to_entry;

/// Forward-only cursor over the rows of one query.
///
/// Rows are decoded one at a time as the caller advances. A cursor is
/// finite; to start over, ask the store for a new one.
pub struct EntryCursor {
    rows: libsql::Rows,
}

impl EntryCursor {
    pub(crate) const fn new(rows: libsql::Rows) -> Self {
        Self { rows }
    }

    /// Decode the next entry, or `None` once the query is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if reading or decoding the row fails.
    pub async fn next(&mut self) -> Result<Option<WorkoutLogEntry>, DatabaseError> {
        match self.rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Drain the cursor into a vector, stopping after `limit` entries if given.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first row that fails to read.
    pub async fn collect(
        mut self,
        limit: Option<usize>,
    ) -> Result<Vec<WorkoutLogEntry>, DatabaseError> {
        let mut entries = Vec::new();
        while limit.is_none_or(|max| entries.len() < max) {
            match self.next().await? {
                Some(entry) => entries.push(entry),
                None => break,
            }
        }
        Ok(entries)
    }

    /// Adapt the cursor to a `Stream` of entries.
    pub fn into_stream(self) -> impl Stream<Item = Result<WorkoutLogEntry, DatabaseError>> {
        futures::stream::try_unfold(self, |mut cursor| async move {
            Ok(cursor.next().await?.map(|entry| (entry, cursor)))
        })
    }
}
