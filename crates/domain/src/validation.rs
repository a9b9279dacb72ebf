use crate::{Exercise, ExerciseID};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Every exercise must have a valid name.")]
    InvalidName { id: ExerciseID },
    #[error("Sets, reps, and weight for each exercise must be at least 1.")]
    BelowMinimum { id: ExerciseID },
}

impl ValidationError {
    #[must_use]
    pub fn exercise_id(&self) -> ExerciseID {
        match self {
            ValidationError::InvalidName { id } | ValidationError::BelowMinimum { id } => *id,
        }
    }
}

/// Check the exercises in order and report the first violated rule.
pub fn validate_exercises(exercises: &[Exercise]) -> Result<(), ValidationError> {
    for exercise in exercises {
        if exercise.name.trim().is_empty() {
            return Err(ValidationError::InvalidName { id: exercise.id });
        }
        if exercise.sets < 1
            || exercise.reps < 1
            || !exercise.weight.is_finite()
            || exercise.weight < 1.0
        {
            return Err(ValidationError::BelowMinimum { id: exercise.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise(name: &str, sets: u32, reps: u32, weight: f32) -> Exercise {
        Exercise {
            id: 1.into(),
            name: name.to_string(),
            sets,
            reps,
            weight,
        }
    }

    #[rstest]
    #[case::valid(exercise("Squat", 3, 5, 1.0))]
    #[case::surrounding_whitespace(exercise(" Squat ", 1, 1, 100.0))]
    fn test_validate_exercises_valid(#[case] exercise: Exercise) {
        assert_eq!(validate_exercises(&[exercise]), Ok(()));
    }

    #[test]
    fn test_validate_exercises_empty_list() {
        assert_eq!(validate_exercises(&[]), Ok(()));
    }

    #[rstest]
    #[case::blank_name(exercise("  ", 3, 5, 10.0), ValidationError::InvalidName { id: 1.into() })]
    #[case::empty_name(exercise("", 3, 5, 10.0), ValidationError::InvalidName { id: 1.into() })]
    #[case::zero_sets(exercise("Squat", 0, 5, 10.0), ValidationError::BelowMinimum { id: 1.into() })]
    #[case::zero_reps(exercise("Squat", 3, 0, 10.0), ValidationError::BelowMinimum { id: 1.into() })]
    #[case::low_weight(exercise("Squat", 3, 5, 0.5), ValidationError::BelowMinimum { id: 1.into() })]
    #[case::nan_weight(exercise("Squat", 3, 5, f32::NAN), ValidationError::BelowMinimum { id: 1.into() })]
    #[case::infinite_weight(exercise("Squat", 3, 5, f32::INFINITY), ValidationError::BelowMinimum { id: 1.into() })]
    #[case::name_checked_first(exercise("", 0, 0, 0.0), ValidationError::InvalidName { id: 1.into() })]
    fn test_validate_exercises_invalid(
        #[case] exercise: Exercise,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(validate_exercises(&[exercise]), Err(expected));
    }

    #[test]
    fn test_validate_exercises_stops_at_first_violation() {
        let exercises = [
            Exercise {
                id: 1.into(),
                ..exercise("Squat", 3, 5, 100.0)
            },
            Exercise {
                id: 2.into(),
                ..exercise("Bench Press", 0, 5, 60.0)
            },
            Exercise {
                id: 3.into(),
                ..exercise(" ", 3, 5, 60.0)
            },
        ];

        let error = validate_exercises(&exercises).unwrap_err();

        assert_eq!(error, ValidationError::BelowMinimum { id: 2.into() });
        assert_eq!(error.exercise_id(), ExerciseID::from(2));
        assert_eq!(
            error.to_string(),
            "Sets, reps, and weight for each exercise must be at least 1."
        );
    }
}
