#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod progress;
mod service;
mod session;
mod statistics;
mod validation;
mod workout;

pub use error::{DeleteError, ReadError, StorageError, UpdateError};
pub use progress::{
    ExerciseProgressRepository, ExerciseProgressService, ExerciseSeriesMap, PercentChange,
    SeriesSummary, Trend, resolve_selection,
};
pub use service::Service;
pub use session::{SessionRepository, SessionService, User, UserID};
pub use statistics::{Consistency, longest_streak, longest_streak_of_dates, workouts_in_month};
pub use validation::{ValidationError, validate_exercises};
pub use workout::{
    Exercise, ExerciseField, ExerciseID, Workout, WorkoutID, WorkoutRepository, WorkoutService,
    update_exercise,
};
