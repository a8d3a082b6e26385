//! Sync status and ordering enums for liftlog.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `SyncStatus` provides `allowed_next_states()` to enforce valid transitions
//! at the application layer; the store repeats the same rule in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SyncStatus
// ---------------------------------------------------------------------------

/// Synchronization status of a workout log entry.
///
/// ```text
/// pending → synced
///         → failed → pending
/// ```
///
/// `synced` is terminal: no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Pending,
    Synced,
    Failed,
}

impl SyncStatus {
    /// Every status, in storage-code order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Synced, Self::Failed];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Synced, Self::Failed],
            Self::Failed => &[Self::Pending],
            Self::Synced => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// States from which `target` may be reached.
    #[must_use]
    pub fn allowed_sources(target: Self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(target))
            .collect()
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Synced)
    }

    /// Whether the entry still needs to reach the remote store.
    ///
    /// End users see `pending` and `failed` alike as "not yet synced".
    #[must_use]
    pub const fn counts_as_unsynced(self) -> bool {
        !self.is_terminal()
    }

    /// Integer code persisted in the `sync_status` column.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::Synced => 1,
            Self::Failed => 2,
        }
    }

    /// Decode a persisted `sync_status` code.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidStoredValue` for codes outside `0..=2`.
    pub fn from_code(code: i64) -> Result<Self, CoreError> {
        match code {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Synced),
            2 => Ok(Self::Failed),
            other => Err(CoreError::InvalidStoredValue {
                what: "sync_status",
                value: other.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Synced => "synced",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimeOrder
// ---------------------------------------------------------------------------

/// Ordering of entries by workout timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeOrder {
    Ascending,
    #[default]
    Descending,
}

impl TimeOrder {
    /// SQL keyword for this ordering.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(sync_pending, SyncStatus, SyncStatus::Pending, "pending");
    test_serde_roundtrip!(sync_synced, SyncStatus, SyncStatus::Synced, "synced");
    test_serde_roundtrip!(sync_failed, SyncStatus, SyncStatus::Failed, "failed");
    test_serde_roundtrip!(order_desc, TimeOrder, TimeOrder::Descending, "descending");

    #[test]
    fn valid_transitions() {
        assert!(SyncStatus::Pending.can_transition_to(SyncStatus::Synced));
        assert!(SyncStatus::Pending.can_transition_to(SyncStatus::Failed));
        assert!(SyncStatus::Failed.can_transition_to(SyncStatus::Pending));
    }

    #[test]
    fn synced_is_terminal() {
        for next in SyncStatus::ALL {
            assert!(!SyncStatus::Synced.can_transition_to(next));
        }
        assert!(SyncStatus::Synced.is_terminal());
    }

    #[test]
    fn failed_cannot_jump_to_synced() {
        assert!(!SyncStatus::Failed.can_transition_to(SyncStatus::Synced));
        assert!(!SyncStatus::Pending.can_transition_to(SyncStatus::Pending));
    }

    #[test]
    fn allowed_sources_mirror_transitions() {
        assert_eq!(
            SyncStatus::allowed_sources(SyncStatus::Synced),
            vec![SyncStatus::Pending]
        );
        assert_eq!(
            SyncStatus::allowed_sources(SyncStatus::Pending),
            vec![SyncStatus::Failed]
        );
        assert_eq!(
            SyncStatus::allowed_sources(SyncStatus::Failed),
            vec![SyncStatus::Pending]
        );
    }

    #[test]
    fn codes_roundtrip() {
        for status in SyncStatus::ALL {
            assert_eq!(SyncStatus::from_code(status.code()).unwrap(), status);
        }
        assert!(SyncStatus::from_code(7).is_err());
    }

    #[test]
    fn failed_and_pending_both_unsynced() {
        assert!(SyncStatus::Pending.counts_as_unsynced());
        assert!(SyncStatus::Failed.counts_as_unsynced());
        assert!(!SyncStatus::Synced.counts_as_unsynced());
    }
}
