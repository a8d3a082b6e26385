//! Log store service wrapping the raw database with change notifications.
//!
//! `LogStore` wraps `LogDb` (raw database access) and a `watch` channel that
//! carries a change counter. All repo methods are implemented as
//! `impl LogStore` blocks under `repos/`.

use std::path::Path;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, watch};

use crate::LogDb;
use crate::error::DatabaseError;

/// The process-wide owner of persisted workout log state.
///
/// Every mutation follows this protocol:
/// 1. Take the store write lock
/// 2. Execute a single SQL statement (atomic in `SQLite`)
/// 3. If it changed at least one row, bump the change counter
///
/// The lock keeps the per-connection row-change count accurate while several
/// tasks share one connection. Reads do not take it.
///
/// Observers holding a receiver from [`LogStore::subscribe`] are woken after
/// the write is committed, so any read they issue sees it.
pub struct LogStore {
    db: LogDb,
    write_lock: Mutex<()>,
    changes: watch::Sender<u64>,
}

impl LogStore {
    /// Open a store backed by a local database path, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = LogDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Open a store at a file path, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_path(path: &Path) -> Result<Self, DatabaseError> {
        let db = LogDb::open_path(path).await?;
        Ok(Self::from_db(db))
    }

    /// Open a store at a file path with an explicit busy timeout.
    ///
    /// Other processes may hold the database lock briefly; writes wait up to
    /// `busy_timeout` for it before failing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_path_with(
        path: &Path,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = LogDb::open_path_with(path, busy_timeout).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `LogDb`.
    #[must_use]
    pub fn from_db(db: LogDb) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            db,
            write_lock: Mutex::new(()),
            changes,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LogDb {
        &self.db
    }

    /// Subscribe to store changes.
    ///
    /// The value is a counter incremented after every committed insert or
    /// status transition. Only the latest value is retained.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Current value of the change counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Serialize a mutation against every other mutation on this store.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Publish a committed change to subscribers.
    pub(crate) fn notify_changed(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}
