//! Shared test utilities for liftlog-sync unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use liftlog_core::entities::WorkoutLogEntry;
use liftlog_core::validation::NewWorkout;
use liftlog_db::service::LogStore;

use crate::uploader::{RemoteUploader, UploadOutcome};

/// Answers every upload from a script, counting calls.
#[derive(Clone)]
pub struct ScriptedUploader {
    default: UploadOutcome,
    by_id: HashMap<String, UploadOutcome>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedUploader {
    pub fn accepting() -> Self {
        Self::always(UploadOutcome::Accepted)
    }

    pub fn always(outcome: UploadOutcome) -> Self {
        Self {
            default: outcome,
            by_id: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with(mut self, id: &str, outcome: UploadOutcome) -> Self {
        self.by_id.insert(id.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteUploader for ScriptedUploader {
    async fn upload(&self, entry: &WorkoutLogEntry) -> UploadOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.by_id
            .get(&entry.id)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

/// Never answers.
pub struct StalledUploader;

impl RemoteUploader for StalledUploader {
    async fn upload(&self, _entry: &WorkoutLogEntry) -> UploadOutcome {
        std::future::pending().await
    }
}

pub async fn memory_store() -> Arc<LogStore> {
    Arc::new(LogStore::open_local(":memory:").await.unwrap())
}

/// A store holding one pending Squat entry.
pub async fn squat_store() -> (Arc<LogStore>, WorkoutLogEntry) {
    let store = memory_store().await;
    let entry = store.insert(&workout("Squat", 4, 8, 60.0)).await.unwrap();
    (store, entry)
}

pub fn workout(name: &str, sets: u32, reps: u32, weight: f64) -> NewWorkout {
    NewWorkout::new(name, sets, reps, weight).unwrap()
}
