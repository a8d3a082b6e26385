//! Error types for liftlog-sync.

use liftlog_config::ConfigError;
use liftlog_core::errors::CoreError;
use liftlog_db::error::DatabaseError;
use thiserror::Error;

/// Errors from a sync run or from setting up the uploader.
///
/// Per-entry upload problems are not errors; they are recorded as `failed`
/// entries and counted in the `SyncReport`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local store could not be read or updated as a whole.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// Every upload in a non-empty batch failed to reach the remote store.
    #[error("remote store unreachable ({attempted} uploads attempted)")]
    RemoteUnreachable { attempted: usize },

    /// The remote store is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors from the write path.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Input failed domain validation; nothing was stored.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The store could not persist the entry; nothing was stored.
    #[error("could not persist workout: {0}")]
    Persistence(#[from] DatabaseError),
}

impl WriteError {
    /// The offending field for validation failures.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => e.field(),
            Self::Persistence(_) => None,
        }
    }
}
