//! Validated input for the write path.
//!
//! A `NewWorkout` can only be built through [`NewWorkout::new`], so anything
//! handed to the store has already passed the domain checks.

use serde::Serialize;

use crate::errors::CoreError;

/// Longest accepted exercise name, in characters.
pub const MAX_EXERCISE_NAME_CHARS: usize = 120;

/// A workout that passed validation and is ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkout {
    exercise_name: String,
    sets: u32,
    reps: u32,
    weight: f64,
}

impl NewWorkout {
    /// Validate raw input.
    ///
    /// Fields are checked in order `exercise_name`, `sets`, `reps`, `weight`;
    /// the first failure is reported. The exercise name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the offending field.
    pub fn new(exercise_name: &str, sets: u32, reps: u32, weight: f64) -> Result<Self, CoreError> {
        let exercise_name = exercise_name.trim();
        if exercise_name.is_empty() {
            return Err(invalid("exercise_name", "must not be empty"));
        }
        if exercise_name.chars().count() > MAX_EXERCISE_NAME_CHARS {
            return Err(invalid(
                "exercise_name",
                format!("must be at most {MAX_EXERCISE_NAME_CHARS} characters"),
            ));
        }
        if sets == 0 {
            return Err(invalid("sets", "must be a positive integer"));
        }
        if reps == 0 {
            return Err(invalid("reps", "must be a positive integer"));
        }
        if !weight.is_finite() {
            return Err(invalid("weight", "must be a finite number"));
        }
        if weight < 0.0 {
            return Err(invalid("weight", "must not be negative"));
        }

        Ok(Self {
            exercise_name: exercise_name.to_string(),
            sets,
            reps,
            // Collapse -0.0 so it persists as 0.
            weight: weight + 0.0,
        })
    }

    #[must_use]
    pub fn exercise_name(&self) -> &str {
        &self.exercise_name
    }

    #[must_use]
    pub const fn sets(&self) -> u32 {
        self.sets
    }

    #[must_use]
    pub const fn reps(&self) -> u32 {
        self.reps
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_valid_input() {
        let workout = NewWorkout::new("Squat", 4, 8, 60.0).unwrap();
        assert_eq!(workout.exercise_name(), "Squat");
        assert_eq!(workout.sets(), 4);
        assert_eq!(workout.reps(), 8);
        assert!((workout.weight() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trims_exercise_name() {
        let workout = NewWorkout::new("  Deadlift \n", 1, 5, 140.0).unwrap();
        assert_eq!(workout.exercise_name(), "Deadlift");
    }

    #[test]
    fn zero_weight_is_allowed() {
        let workout = NewWorkout::new("Pull-up", 3, 10, 0.0).unwrap();
        assert!(workout.weight().abs() < f64::EPSILON);
    }

    #[test]
    fn negative_zero_weight_is_normalized() {
        let workout = NewWorkout::new("Pull-up", 3, 10, -0.0).unwrap();
        assert!(workout.weight().is_sign_positive());
    }

    #[rstest]
    #[case("", 3, 10, 20.0, "exercise_name")]
    #[case("   ", 3, 10, 20.0, "exercise_name")]
    #[case("Bench", 0, 10, 20.0, "sets")]
    #[case("Bench", 3, 0, 20.0, "reps")]
    #[case("Bench", 3, 10, -0.5, "weight")]
    #[case("Bench", 3, 10, f64::NAN, "weight")]
    #[case("Bench", 3, 10, f64::INFINITY, "weight")]
    #[case("", 0, 0, -1.0, "exercise_name")]
    #[case("Bench", 0, 0, -1.0, "sets")]
    fn rejects_invalid_input(
        #[case] name: &str,
        #[case] sets: u32,
        #[case] reps: u32,
        #[case] weight: f64,
        #[case] field: &str,
    ) {
        let err = NewWorkout::new(name, sets, reps, weight).unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(MAX_EXERCISE_NAME_CHARS + 1);
        let err = NewWorkout::new(&name, 1, 1, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("exercise_name"));
        assert!(NewWorkout::new(&name[1..], 1, 1, 1.0).is_ok());
    }
}
