//! Cross-cutting error types for liftlog.
//!
//! Storage errors (`DatabaseError`) live in `liftlog-db`; sync errors live in
//! `liftlog-sync`. The CLI converges everything into `anyhow::Result`.

use thiserror::Error;

/// Errors that can be raised by any liftlog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed domain validation. Not retriable: the caller must fix it.
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// A persisted value could not be decoded into a domain type.
    #[error("Invalid stored value for {what}: {value}")]
    InvalidStoredValue { what: &'static str, value: String },
}

impl CoreError {
    /// Name of the offending field for validation failures.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::InvalidStoredValue { .. } => None,
        }
    }
}
