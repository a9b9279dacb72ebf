//! Workout detail and edit screen
//!
//! ```text
//! Idle -> Loading -> Loaded -> [Editing] -> Submitting -> Succeeded
//!            |          ^                       |
//!            v          +---------- failure ----+
//!          Failed
//! ```

use std::cell::RefCell;

use gym_tracker_domain::{
    Exercise, ExerciseField, ExerciseID, ValidationError, Workout, WorkoutID, WorkoutService,
    update_exercise,
};
use log::debug;

use crate::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum EditorState {
    Idle,
    Loading,
    Loaded,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

impl EditorState {
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, EditorState::Loaded | EditorState::Editing)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("workout cannot be submitted while {0}")]
    NotEditable(EditorState),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug)]
pub struct WorkoutEditor {
    id: WorkoutID,
    state: EditorState,
    workout: Option<Workout>,
    exercises: Vec<Exercise>,
    error: Option<String>,
}

impl WorkoutEditor {
    #[must_use]
    pub fn new(id: WorkoutID) -> Self {
        Self {
            id,
            state: EditorState::Idle,
            workout: None,
            exercises: vec![],
            error: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> WorkoutID {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    #[must_use]
    pub fn workout(&self) -> Option<&Workout> {
        self.workout.as_ref()
    }

    /// The exercises including all local edits.
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// The error of the last failed operation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Session {}", self.id)
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<i64> {
        self.workout.as_ref().map(Workout::duration_minutes)
    }

    pub fn start_loading(&mut self) {
        self.state = EditorState::Loading;
        self.error = None;
    }

    pub fn finish_loading(&mut self, result: Result<Workout, String>) {
        match result {
            Ok(workout) => {
                self.exercises.clone_from(&workout.exercises);
                self.workout = Some(workout);
                self.error = None;
                self.state = EditorState::Loaded;
            }
            Err(err) => {
                self.workout = None;
                self.exercises = vec![];
                self.error = Some(err);
                self.state = EditorState::Failed;
            }
        }
    }

    /// Replace a single field of an exercise.
    ///
    /// Returns false if the workout is currently not editable.
    pub fn update_exercise(&mut self, id: ExerciseID, field: &ExerciseField) -> bool {
        if !self.state.is_editable() {
            debug!("ignored edit of exercise {id} while {}", self.state);
            return false;
        }
        self.exercises = update_exercise(&self.exercises, id, field);
        self.state = EditorState::Editing;
        true
    }

    /// Validate the edits and enter the submitting state.
    pub fn begin_submit<S: WorkoutService>(&mut self, service: &S) -> Result<Workout, SubmitError> {
        let Some(workout) = self.workout.as_ref().filter(|_| self.state.is_editable()) else {
            return Err(SubmitError::NotEditable(self.state));
        };
        let updated = service.prepare_update(workout, self.exercises.clone())?;
        self.state = EditorState::Submitting;
        self.error = None;
        Ok(updated)
    }

    /// Enter the submitting state for a deletion.
    pub fn begin_delete(&mut self) -> Result<WorkoutID, SubmitError> {
        if !self.state.is_editable() || self.workout.is_none() {
            return Err(SubmitError::NotEditable(self.state));
        }
        self.state = EditorState::Submitting;
        self.error = None;
        Ok(self.id)
    }

    /// Complete a submission. A failure returns to the editable state and keeps the local edits.
    pub fn finish_submit(&mut self, result: Result<Option<Workout>, String>) {
        match result {
            Ok(workout) => {
                if let Some(workout) = workout {
                    self.exercises.clone_from(&workout.exercises);
                    self.workout = Some(workout);
                }
                self.state = EditorState::Succeeded;
            }
            Err(err) => {
                self.error = Some(err);
                self.state = EditorState::Loaded;
            }
        }
    }
}

pub async fn load<S, N>(editor: &RefCell<WorkoutEditor>, service: &S, notifier: &N)
where
    S: WorkoutService,
    N: Notifier,
{
    let id = {
        let mut editor = editor.borrow_mut();
        editor.start_loading();
        editor.id()
    };

    let result = service.get_workout(id).await.map_err(|err| err.to_string());
    let failed = result.is_err();

    editor.borrow_mut().finish_loading(result);

    if failed {
        notifier.alert("Error", "Failed to load workout details.");
    }
}

/// Submit the edited workout. Returns the final state, `Succeeded` if the screen can be left.
pub async fn save<S, N>(editor: &RefCell<WorkoutEditor>, service: &S, notifier: &N) -> EditorState
where
    S: WorkoutService,
    N: Notifier,
{
    let submission = editor.borrow_mut().begin_submit(service);

    let workout = match submission {
        Ok(workout) => workout,
        Err(SubmitError::Invalid(err)) => {
            notifier.alert("Error", &err.to_string());
            return editor.borrow().state();
        }
        Err(err @ SubmitError::NotEditable(_)) => {
            debug!("{err}");
            return editor.borrow().state();
        }
    };

    let result = service
        .replace_workout(workout)
        .await
        .map(Some)
        .map_err(|err| err.to_string());
    let failed = result.is_err();

    let state = {
        let mut editor = editor.borrow_mut();
        editor.finish_submit(result);
        editor.state()
    };

    if failed {
        notifier.alert("Error", "Failed to update workout.");
    } else {
        notifier.alert("Success", "Workout updated successfully.");
    }

    state
}

/// Delete the workout after confirmation. Returns the final state, `Succeeded` if deleted.
pub async fn delete<S, N>(editor: &RefCell<WorkoutEditor>, service: &S, notifier: &N) -> EditorState
where
    S: WorkoutService,
    N: Notifier,
{
    if !editor.borrow().state().is_editable() {
        return editor.borrow().state();
    }

    if !notifier
        .confirm(
            "Delete Workout",
            "Are you sure you want to delete this workout?",
        )
        .await
    {
        return editor.borrow().state();
    }

    let id = match editor.borrow_mut().begin_delete() {
        Ok(id) => id,
        Err(err) => {
            debug!("{err}");
            return editor.borrow().state();
        }
    };

    let result = service
        .delete_workout(id)
        .await
        .map(|_| None)
        .map_err(|err| err.to_string());
    let failed = result.is_err();

    let state = {
        let mut editor = editor.borrow_mut();
        editor.finish_submit(result);
        editor.state()
    };

    if failed {
        notifier.alert("Error", "Failed to delete workout.");
    } else {
        notifier.alert("Success", "Workout deleted successfully.");
    }

    state
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::NaiveDate;
    use gym_tracker_domain::{DeleteError, ReadError, StorageError, UpdateError, UserID};
    use pretty_assertions::assert_eq;

    use crate::tests::{FakeNotifier, alert};

    use super::*;

    fn workout() -> Workout {
        let start_time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Workout {
            id: 7.into(),
            start_time,
            end_time: start_time + chrono::Duration::minutes(62),
            exercises: vec![
                Exercise {
                    id: 1.into(),
                    name: "Squat".to_string(),
                    sets: 3,
                    reps: 5,
                    weight: 100.0,
                },
                Exercise {
                    id: 2.into(),
                    name: "Bench Press".to_string(),
                    sets: 3,
                    reps: 8,
                    weight: 60.0,
                },
            ],
        }
    }

    #[derive(Default)]
    struct FakeService {
        workout: RefCell<Option<Workout>>,
        offline: bool,
        replace_calls: Cell<usize>,
    }

    impl FakeService {
        fn with_workout() -> Self {
            Self {
                workout: RefCell::new(Some(workout())),
                ..Self::default()
            }
        }
    }

    impl WorkoutService for FakeService {
        async fn get_workouts(&self, _: UserID) -> Result<Vec<Workout>, ReadError> {
            Ok(self.workout.borrow().iter().cloned().collect())
        }

        async fn get_workout(&self, _: WorkoutID) -> Result<Workout, ReadError> {
            if self.offline {
                return Err(StorageError::NoConnection.into());
            }
            self.workout
                .borrow()
                .clone()
                .ok_or_else(|| StorageError::Status(404).into())
        }

        async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
            self.replace_calls.set(self.replace_calls.get() + 1);
            if self.offline {
                return Err(StorageError::NoConnection.into());
            }
            *self.workout.borrow_mut() = Some(workout.clone());
            Ok(workout)
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            if self.offline {
                return Err(StorageError::NoConnection.into());
            }
            *self.workout.borrow_mut() = None;
            Ok(id)
        }
    }

    async fn loaded_editor(service: &FakeService) -> RefCell<WorkoutEditor> {
        let editor = RefCell::new(WorkoutEditor::new(7.into()));
        load(&editor, service, &FakeNotifier::default()).await;
        editor
    }

    #[tokio::test]
    async fn test_load() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let editor = editor.borrow();

        assert_eq!(editor.state(), EditorState::Loaded);
        assert_eq!(editor.exercises(), workout().exercises.as_slice());
        assert_eq!(editor.duration_minutes(), Some(62));
        assert_eq!(editor.title(), "Session 7");
    }

    #[tokio::test]
    async fn test_load_failure() {
        let service = FakeService::default();
        let editor = RefCell::new(WorkoutEditor::new(7.into()));
        let notifier = FakeNotifier::default();

        load(&editor, &service, &notifier).await;

        assert_eq!(editor.borrow().state(), EditorState::Failed);
        assert_eq!(editor.borrow().workout(), None);
        assert_eq!(
            notifier.alerts(),
            vec![alert("Error", "Failed to load workout details.")]
        );
    }

    #[tokio::test]
    async fn test_save() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let notifier = FakeNotifier::default();

        assert!(
            editor
                .borrow_mut()
                .update_exercise(2.into(), &ExerciseField::Weight(62.5))
        );
        assert_eq!(editor.borrow().state(), EditorState::Editing);

        assert_eq!(
            save(&editor, &service, &notifier).await,
            EditorState::Succeeded
        );

        let saved = service.workout.borrow().clone().unwrap();
        assert_eq!(saved.exercises[1].weight, 62.5);
        assert_eq!(saved.exercises[0], workout().exercises[0]);
        assert_eq!(saved.start_time, workout().start_time);
        assert_eq!(
            notifier.alerts(),
            vec![alert("Success", "Workout updated successfully.")]
        );
    }

    #[tokio::test]
    async fn test_save_invalid() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let notifier = FakeNotifier::default();

        editor
            .borrow_mut()
            .update_exercise(1.into(), &ExerciseField::Sets(0));

        assert_eq!(
            save(&editor, &service, &notifier).await,
            EditorState::Editing
        );
        assert_eq!(service.replace_calls.get(), 0);
        assert_eq!(
            notifier.alerts(),
            vec![alert(
                "Error",
                "Sets, reps, and weight for each exercise must be at least 1."
            )]
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_edits() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let offline = FakeService {
            offline: true,
            ..FakeService::with_workout()
        };
        let notifier = FakeNotifier::default();

        editor
            .borrow_mut()
            .update_exercise(1.into(), &ExerciseField::Name("Front Squat".to_string()));

        assert_eq!(
            save(&editor, &offline, &notifier).await,
            EditorState::Loaded
        );
        assert_eq!(editor.borrow().exercises()[0].name, "Front Squat");
        assert_eq!(editor.borrow().error(), Some("no connection"));
        assert_eq!(
            notifier.alerts(),
            vec![alert("Error", "Failed to update workout.")]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let notifier = FakeNotifier::answering(true);

        assert_eq!(
            delete(&editor, &service, &notifier).await,
            EditorState::Succeeded
        );
        assert!(service.workout.borrow().is_none());
        assert_eq!(notifier.confirmations.get(), 1);
        assert_eq!(
            notifier.alerts(),
            vec![alert("Success", "Workout deleted successfully.")]
        );
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let service = FakeService::with_workout();
        let editor = loaded_editor(&service).await;
        let notifier = FakeNotifier::answering(false);

        assert_eq!(
            delete(&editor, &service, &notifier).await,
            EditorState::Loaded
        );
        assert!(service.workout.borrow().is_some());
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let editor = loaded_editor(&FakeService::with_workout()).await;
        let offline = FakeService {
            offline: true,
            ..FakeService::with_workout()
        };
        let notifier = FakeNotifier::answering(true);

        assert_eq!(
            delete(&editor, &offline, &notifier).await,
            EditorState::Loaded
        );
        assert_eq!(
            notifier.alerts(),
            vec![alert("Error", "Failed to delete workout.")]
        );
    }

    #[test]
    fn test_edits_ignored_unless_editable() {
        let mut editor = WorkoutEditor::new(7.into());

        assert!(!editor.update_exercise(1.into(), &ExerciseField::Sets(5)));
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(
            editor.begin_submit(&FakeService::default()),
            Err(SubmitError::NotEditable(EditorState::Idle))
        );
        assert_eq!(
            editor.begin_delete(),
            Err(SubmitError::NotEditable(EditorState::Idle))
        );
    }

    #[test]
    fn test_submitting_blocks_further_submissions() {
        let mut editor = WorkoutEditor::new(7.into());
        editor.start_loading();
        editor.finish_loading(Ok(workout()));

        assert!(editor.begin_submit(&FakeService::default()).is_ok());
        assert_eq!(editor.state(), EditorState::Submitting);
        assert_eq!(
            editor.begin_submit(&FakeService::default()),
            Err(SubmitError::NotEditable(EditorState::Submitting))
        );
    }
}
