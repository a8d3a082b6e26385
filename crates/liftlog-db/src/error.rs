//! Database error types for liftlog-db.

use liftlog_core::enums::SyncStatus;
use liftlog_core::errors::CoreError;
use thiserror::Error;

/// Errors from log store operations.
///
/// Everything except `NotFound` and `IllegalTransition` is a persistence
/// failure: the operation did not change local state.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// No entry with this id exists.
    #[error("Entry not found: {id}")]
    NotFound { id: String },

    /// The requested status change is not allowed from the current status.
    #[error("Illegal sync status transition for {id}: {from} -> {to}")]
    IllegalTransition {
        id: String,
        from: SyncStatus,
        to: SyncStatus,
    },

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether this is a local storage failure rather than a rejected request.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::IllegalTransition { .. })
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        Self::InvalidState(error.to_string())
    }
}
