//! Repository modules implementing log store operations.
//!
//! Each module adds methods to `LogStore` via `impl LogStore` blocks.

pub mod history;
pub mod transition;
pub mod workout;
