//! # liftlog-core
//!
//! Core types, ID generation, and error types for liftlog.
//!
//! This crate provides the foundational types shared across all liftlog crates:
//! - The `WorkoutLogEntry` entity and its validated `NewWorkout` input
//! - The `SyncStatus` state machine
//! - ID prefix constants
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod validation;
