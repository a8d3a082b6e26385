//! Row-to-entity parsing helpers.
//!
//! Converts `libsql::Row` (column-indexed) into typed entities. Timestamps are
//! written as fixed-width RFC 3339 in UTC with microsecond precision so that
//! text ordering matches chronological ordering.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use liftlog_core::enums::SyncStatus;

use crate::error::DatabaseError;

/// Current time at the precision the store keeps.
#[must_use]
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles RFC 3339 and `SQLite`'s default `datetime('now')` format.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read an INTEGER status column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for codes that are not a `SyncStatus`.
pub fn get_status(row: &libsql::Row, idx: i32) -> Result<SyncStatus, DatabaseError> {
    Ok(SyncStatus::from_code(row.get::<i64>(idx)?)?)
}

/// Read a positive INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value does not fit.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("column {idx} out of range: {raw}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// SQL list of the status codes from which `target` may be reached.
///
/// Built from `SyncStatus` itself, so it is safe to inline into SQL text.
#[must_use]
pub fn source_codes_sql(target: SyncStatus) -> String {
    SyncStatus::allowed_sources(target)
        .iter()
        .map(|s| s.code().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
