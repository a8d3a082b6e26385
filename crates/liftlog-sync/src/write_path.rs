//! The only way new workout entries are created.

use std::sync::Arc;

use liftlog_core::entities::WorkoutLogEntry;
use liftlog_core::validation::NewWorkout;
use liftlog_db::service::LogStore;

use crate::error::WriteError;

/// Validates workout input and persists it as a `pending` entry.
#[derive(Clone)]
pub struct WorkoutLogger {
    store: Arc<LogStore>,
}

impl WorkoutLogger {
    #[must_use]
    pub const fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }

    /// Record a workout.
    ///
    /// Nothing is stored unless every field is valid. The returned entry is
    /// `pending` and already visible to every reader of the store.
    ///
    /// # Errors
    ///
    /// Returns `WriteError::Validation` naming the first invalid field, or
    /// `WriteError::Persistence` if the store could not commit the entry.
    pub async fn log_workout(
        &self,
        exercise_name: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<WorkoutLogEntry, WriteError> {
        let workout = NewWorkout::new(exercise_name, sets, reps, weight)?;
        let entry = self.store.insert(&workout).await?;
        tracing::info!(entry_id = %entry.id, exercise = %entry.exercise_name, "workout logged");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;
    use liftlog_core::enums::{SyncStatus, TimeOrder};

    #[tokio::test]
    async fn logged_workout_is_pending_and_visible() {
        let store = memory_store().await;
        let logger = WorkoutLogger::new(Arc::clone(&store));

        let entry = logger.log_workout("Squat", 4, 8, 60.0).await.unwrap();
        assert_eq!(entry.sync_status, SyncStatus::Pending);
        assert!(entry.id.starts_with("wkl-"));

        let all = store.all_ordered_by_time(TimeOrder::Descending).await.unwrap();
        assert_eq!(all, vec![entry.clone()]);
        let pending = store.pending_entries().await.unwrap();
        assert_eq!(pending[0].id, entry.id);
    }

    #[tokio::test]
    async fn invalid_input_names_the_field_and_stores_nothing() {
        let store = memory_store().await;
        let logger = WorkoutLogger::new(Arc::clone(&store));

        let cases = [
            ("   ", 4, 8, 60.0, "exercise_name"),
            ("Squat", 0, 8, 60.0, "sets"),
            ("Squat", 4, 0, 60.0, "reps"),
            ("Squat", 4, 8, -1.0, "weight"),
            ("Squat", 4, 8, f64::NAN, "weight"),
        ];
        for (name, sets, reps, weight, field) in cases {
            let err = logger.log_workout(name, sets, reps, weight).await.unwrap_err();
            assert!(matches!(err, WriteError::Validation(_)));
            assert_eq!(err.field(), Some(field));
        }

        assert_eq!(store.counts().await.unwrap().total(), 0);
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn exercise_name_is_stored_trimmed() {
        let store = memory_store().await;
        let logger = WorkoutLogger::new(Arc::clone(&store));

        let entry = logger.log_workout("  Bench Press ", 3, 5, 80.0).await.unwrap();
        assert_eq!(entry.exercise_name, "Bench Press");
        assert_eq!(
            store.get_entry(&entry.id).await.unwrap().exercise_name,
            "Bench Press"
        );
    }
}
