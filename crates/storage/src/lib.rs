#![warn(clippy::pedantic)]

use std::sync::{Arc, Mutex};

use gym_tracker_domain::{
    self as domain, ExerciseProgressRepository, SessionRepository, WorkoutRepository,
};
use gym_tracker_web_app::{Settings, log};

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;

use rest::{GlooNetSendRequest, REST, SendRequest};

/// Repositories of the app: the signed-in user from local storage, everything else from the API.
pub struct Storage<S: SendRequest = GlooNetSendRequest> {
    rest: REST<S>,
    session: local_storage::Session,
}

impl Storage<GlooNetSendRequest> {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            rest: REST::new(settings),
            session: local_storage::Session,
        }
    }
}

impl<S: SendRequest> SessionRepository for Storage<S> {
    async fn read_current_user(&self) -> Result<Option<domain::User>, domain::ReadError> {
        self.session.read_current_user().await
    }
}

impl<S: SendRequest> WorkoutRepository for Storage<S> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.rest.read_workouts(user_id).await
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.rest.read_workout(id).await
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.rest.replace_workout(workout).await
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.rest.delete_workout(id).await
    }
}

impl<S: SendRequest> ExerciseProgressRepository for Storage<S> {
    async fn read_exercise_series(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::ExerciseSeriesMap, domain::ReadError> {
        self.rest.read_exercise_series(user_id).await
    }
}

/// Route log records to the console and to local storage.
///
/// # Errors
///
/// Returns an error if a logger has already been set.
pub fn init_logging(settings: &Settings) -> Result<(), ::log::SetLoggerError> {
    log::init(
        Arc::new(Mutex::new(local_storage::Log)),
        settings.log_level.into(),
    )
}
