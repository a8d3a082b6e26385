//! Entity structs for liftlog domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod sync_event;
mod workout;

pub use sync_event::SyncEvent;
pub use workout::WorkoutLogEntry;
