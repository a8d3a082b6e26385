//! # liftlog-db
//!
//! libSQL log store for liftlog.
//!
//! Persists workout log entries together with their synchronization status,
//! enforces the sync state machine with conditional updates (and SQL triggers
//! as a backstop), records every status change in `sync_events`, and publishes
//! a change counter that observers can subscribe to.
//!
//! Uses the `libsql` crate in local-only mode: one embedded database file per
//! device, or `":memory:"` for tests.

pub mod cursor;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::Path;
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use liftlog_core::ids::ID_RANDOM_BYTES;

/// How long a write waits for another connection's lock unless told otherwise.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `SQLite` takes the busy timeout as an `int` of milliseconds.
fn busy_timeout_ms(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}

/// Raw database handle: one libSQL database and its connection.
///
/// Repository methods live on [`service::LogStore`], which wraps this handle.
pub struct LogDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LogDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open. File databases are put in
    /// `synchronous = FULL` so a committed write survives a crash. Writes wait
    /// up to [`DEFAULT_BUSY_TIMEOUT`] for a lock held by another connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Like [`open_local`](Self::open_local) with an explicit busy timeout.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection settings in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        conn.execute("PRAGMA synchronous = FULL", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA synchronous: {e}")))?;
        // Returns the new value as a row, so it goes through `query`.
        let busy_ms = busy_timeout_ms(busy_timeout);
        conn.query(&format!("PRAGMA busy_timeout = {busy_ms}"), ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let log_db = Self { db, conn };
        log_db.run_migrations().await?;
        tracing::debug!(path, busy_timeout_ms = busy_ms, "log database opened");
        Ok(log_db)
    }

    /// Open a database file, creating its parent directory first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created, the path is
    /// not valid UTF-8, or opening fails.
    pub async fn open_path(path: &Path) -> Result<Self, DatabaseError> {
        Self::open_path_with(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Like [`open_path`](Self::open_path) with an explicit busy timeout.
    ///
    /// # Errors
    ///
    /// Same as [`open_path`](Self::open_path).
    pub async fn open_path_with(
        path: &Path,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
        }
        let path = path.to_str().ok_or_else(|| {
            DatabaseError::InvalidState(format!("non UTF-8 database path: {}", path.display()))
        })?;
        Self::open_local_with(path, busy_timeout).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"wkl-a3f8b2c1d4e5f607"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob({ID_RANDOM_BYTES})))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
