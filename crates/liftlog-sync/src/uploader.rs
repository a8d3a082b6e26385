//! The boundary between the sync coordinator and the remote document store.

use std::future::Future;
use std::sync::Arc;

use liftlog_core::entities::WorkoutLogEntry;
use serde::Serialize;

/// What the remote store said about one upload.
///
/// Only `Accepted` means the entry is durably stored remotely. Every other
/// outcome leaves the remote state unknown or unchanged, and the entry is
/// recorded as `failed` locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// The remote store durably accepted the record.
    Accepted,
    /// The remote store answered and refused the record.
    Rejected(String),
    /// No answer within the upload timeout.
    Timeout,
    /// The remote store could not be reached at all.
    Unreachable(String),
}

impl UploadOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Reason stored with the `failed` transition. `None` for `Accepted`.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(format!("rejected: {reason}")),
            Self::Timeout => Some("timeout".to_string()),
            Self::Unreachable(reason) => Some(format!("unreachable: {reason}")),
        }
    }
}

/// Uploads one entry to the remote store.
///
/// Implementations must be idempotent keyed on `entry.id`: uploading the
/// same entry twice leaves exactly one remote record. An upload is a full
/// record replace.
pub trait RemoteUploader: Send + Sync {
    fn upload(&self, entry: &WorkoutLogEntry) -> impl Future<Output = UploadOutcome> + Send;
}

impl<U: RemoteUploader> RemoteUploader for Arc<U> {
    fn upload(&self, entry: &WorkoutLogEntry) -> impl Future<Output = UploadOutcome> + Send {
        (**self).upload(entry)
    }
}
