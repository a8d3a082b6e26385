use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SyncStatus;

/// One recorded workout: exercise, volume, and when it happened.
///
/// Everything except `sync_status` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WorkoutLogEntry {
    pub id: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub timestamp: DateTime<Utc>,
    pub sync_status: SyncStatus,
}

impl WorkoutLogEntry {
    /// Total repetitions across all sets.
    #[must_use]
    pub const fn total_reps(&self) -> u64 {
        self.sets as u64 * self.reps as u64
    }

    /// Whether the entry still has to reach the remote store.
    #[must_use]
    pub const fn needs_sync(&self) -> bool {
        self.sync_status.counts_as_unsynced()
    }
}
