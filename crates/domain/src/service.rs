use log::{debug, error};

use crate::{
    DeleteError, ExerciseProgressRepository, ExerciseProgressService, ExerciseSeriesMap,
    ReadError, SessionRepository, SessionService, UpdateError, User, UserID, Workout, WorkoutID,
    WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError> {
        log_on_error!(
            self.repository.read_current_user(),
            ReadError,
            "get",
            "current user"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: ExerciseProgressRepository> ExerciseProgressService for Service<R> {
    async fn get_exercise_series(&self, user_id: UserID) -> Result<ExerciseSeriesMap, ReadError> {
        log_on_error!(
            self.repository.read_exercise_series(user_id),
            ReadError,
            "get",
            "exercise series"
        )
    }
}
