use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SyncStatus;

/// A recorded `sync_status` change of one entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncEvent {
    pub entry_id: String,
    pub from_status: SyncStatus,
    pub to_status: SyncStatus,
    /// Failure reason recorded with a `pending → failed` transition.
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
