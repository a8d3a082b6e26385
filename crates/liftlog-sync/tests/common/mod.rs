//! Uploader fakes shared by the integration tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use liftlog_core::entities::WorkoutLogEntry;
use liftlog_sync::{RemoteUploader, UploadOutcome};

/// Answers every upload with the outcome currently set, recording ids.
#[derive(Clone)]
pub struct SwitchableUploader {
    outcome: Arc<Mutex<UploadOutcome>>,
    uploaded: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl SwitchableUploader {
    pub fn new(outcome: UploadOutcome) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            uploaded: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set(&self, outcome: UploadOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

impl RemoteUploader for SwitchableUploader {
    async fn upload(&self, entry: &WorkoutLogEntry) -> UploadOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().unwrap().push(entry.id.clone());
        self.outcome.lock().unwrap().clone()
    }
}
