use chrono::{Duration, NaiveDate, NaiveDateTime};
use derive_more::{Deref, Display, From, Into};

use crate::{DeleteError, ReadError, UpdateError, UserID, ValidationError, validate_exercises};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    /// Validate the edited exercises and combine them with the remaining fields of `workout`.
    fn prepare_update(
        &self,
        workout: &Workout,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, ValidationError> {
        validate_exercises(&exercises)?;
        Ok(workout.with_exercises(exercises))
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let minutes = (self.duration().num_seconds() as f64 / 60.0).round() as i64;
        minutes
    }

    #[must_use]
    pub fn with_exercises(&self, exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            ..self.clone()
        }
    }
}

#[derive(
    Deref, Display, From, Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct WorkoutID(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

impl Exercise {
    #[must_use]
    pub fn with_field(&self, field: ExerciseField) -> Self {
        let mut exercise = self.clone();
        match field {
            ExerciseField::Name(name) => exercise.name = name,
            ExerciseField::Sets(sets) => exercise.sets = sets,
            ExerciseField::Reps(reps) => exercise.reps = reps,
            ExerciseField::Weight(weight) => exercise.weight = weight,
        }
        exercise
    }
}

#[derive(
    Deref, Display, From, Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct ExerciseID(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseField {
    Name(String),
    Sets(u32),
    Reps(u32),
    Weight(f32),
}

/// Return a copy of `exercises` in which the field of the exercise identified by `id` is replaced.
#[must_use]
pub fn update_exercise(
    exercises: &[Exercise],
    id: ExerciseID,
    field: &ExerciseField,
) -> Vec<Exercise> {
    exercises
        .iter()
        .map(|e| {
            if e.id == id {
                e.with_field(field.clone())
            } else {
                e.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise(id: u64, name: &str) -> Exercise {
        Exercise {
            id: id.into(),
            name: name.to_string(),
            sets: 3,
            reps: 5,
            weight: 100.0,
        }
    }

    fn workout(start: &str, end: &str) -> Workout {
        Workout {
            id: 1.into(),
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S").unwrap(),
            end_time: NaiveDateTime::parse_from_str(end, "%Y-%m-%dT%H:%M:%S").unwrap(),
            exercises: vec![exercise(1, "Squat"), exercise(2, "Bench Press")],
        }
    }

    #[test]
    fn test_workout_date() {
        assert_eq!(
            workout("2024-01-01T23:30:00", "2024-01-02T00:30:00").date(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[rstest]
    #[case::full_hour("2024-01-01T08:00:00", "2024-01-01T09:00:00", 60)]
    #[case::round_down("2024-01-01T08:00:00", "2024-01-01T08:45:29", 45)]
    #[case::round_up("2024-01-01T08:00:00", "2024-01-01T08:45:30", 46)]
    #[case::midnight("2024-01-01T23:30:00", "2024-01-02T00:15:00", 45)]
    fn test_workout_duration_minutes(
        #[case] start: &str,
        #[case] end: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(workout(start, end).duration_minutes(), expected);
    }

    #[test]
    fn test_workout_with_exercises() {
        let original = workout("2024-01-01T08:00:00", "2024-01-01T09:00:00");
        let updated = original.with_exercises(vec![exercise(3, "Deadlift")]);

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.start_time, original.start_time);
        assert_eq!(updated.end_time, original.end_time);
        assert_eq!(updated.exercises, vec![exercise(3, "Deadlift")]);
    }

    #[rstest]
    #[case::name(ExerciseField::Name("Front Squat".into()), Exercise { name: "Front Squat".into(), ..exercise(1, "Squat") })]
    #[case::sets(ExerciseField::Sets(5), Exercise { sets: 5, ..exercise(1, "Squat") })]
    #[case::reps(ExerciseField::Reps(8), Exercise { reps: 8, ..exercise(1, "Squat") })]
    #[case::weight(ExerciseField::Weight(102.5), Exercise { weight: 102.5, ..exercise(1, "Squat") })]
    fn test_update_exercise(#[case] field: ExerciseField, #[case] expected: Exercise) {
        let exercises = vec![exercise(1, "Squat"), exercise(2, "Bench Press")];

        assert_eq!(
            update_exercise(&exercises, 1.into(), &field),
            vec![expected, exercise(2, "Bench Press")]
        );
        assert_eq!(
            exercises,
            vec![exercise(1, "Squat"), exercise(2, "Bench Press")]
        );
    }

    #[test]
    fn test_update_exercise_unknown_id() {
        let exercises = vec![exercise(1, "Squat")];

        assert_eq!(
            update_exercise(&exercises, 9.into(), &ExerciseField::Sets(1)),
            exercises
        );
    }
}
