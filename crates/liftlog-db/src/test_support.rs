//! Shared test utilities for liftlog-db unit tests.

pub(crate) mod helpers {
    use liftlog_core::validation::NewWorkout;

    use crate::service::LogStore;

    /// Create an in-memory store.
    pub async fn test_store() -> LogStore {
        LogStore::open_local(":memory:").await.unwrap()
    }

    /// The reference workout used across tests.
    pub fn squat() -> NewWorkout {
        workout("Squat", 4, 8, 60.0)
    }

    pub fn workout(name: &str, sets: u32, reps: u32, weight: f64) -> NewWorkout {
        NewWorkout::new(name, sets, reps, weight).unwrap()
    }
}
