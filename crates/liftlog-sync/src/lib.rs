//! # liftlog-sync
//!
//! Reconciles the local log store with the remote document store.
//!
//! - [`uploader`]: the `RemoteUploader` boundary and its outcomes
//! - [`http`]: the reqwest-backed uploader
//! - [`coordinator`]: one sync pass over the pending entries
//! - [`write_path`]: validated workout logging
//! - [`view_model`]: the observable projection consumed by a presentation layer
//! - [`scheduler`]: a background loop that drives the coordinator

pub mod coordinator;
pub mod error;
pub mod http;
pub mod retry;
pub mod scheduler;
pub mod uploader;
pub mod view_model;
pub mod write_path;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{SyncCoordinator, SyncReport};
pub use error::{SyncError, WriteError};
pub use http::HttpUploader;
pub use scheduler::BackgroundSync;
pub use uploader::{RemoteUploader, UploadOutcome};
pub use view_model::{LogViewModel, LogViewState};
pub use write_path::WorkoutLogger;
