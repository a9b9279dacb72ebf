//! REST
//!
//! Client of the workout API. Every response body wraps its payload in a `data` field.

use std::pin::pin;

use chrono::{DateTime, NaiveDateTime};
use futures_util::future::{Either, select};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use gym_tracker_domain as domain;
use gym_tracker_web_app::Settings;
use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone, Copy, Default)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub base_url: String,
    pub timeout_ms: u32,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            sender: GlooNetSendRequest,
            base_url: settings.api_base().to_string(),
            timeout_ms: settings.request_timeout_ms,
        }
    }
}

impl<S: SendRequest> REST<S> {
    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(&self, request: Request) -> Result<Response, domain::StorageError> {
        let response = pin!(self.sender.send_request(request));
        let timeout = pin!(TimeoutFuture::new(self.timeout_ms));

        match select(response, timeout).await {
            Either::Left((Ok(response), _)) => {
                if response.ok() {
                    Ok(response)
                } else {
                    Err(domain::StorageError::Status(response.status()))
                }
            }
            Either::Left((Err(_), _)) => Err(domain::StorageError::NoConnection),
            Either::Right(_) => {
                warn!("request timed out after {} ms", self.timeout_ms);
                Err(domain::StorageError::NoConnection)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, domain::StorageError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| domain::StorageError::Deserialization(err.to_string()))
    }

    async fn fetch_no_content(&self, request: Request) -> Result<(), domain::StorageError> {
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_text(&self, request: Request) -> Result<String, domain::StorageError> {
        self.send(request)
            .await?
            .text()
            .await
            .map_err(|err| domain::StorageError::Deserialization(err.to_string()))
    }
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let url = self.url(&format!("workout/workouts/{user_id}"));
        let request = build(Request::get(&url).build())?;
        let envelope: Envelope<Workouts> = self.fetch(request).await?;
        Ok(envelope
            .data
            .workouts
            .unwrap_or_default()
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        let request = build(Request::get(&self.url(&format!("workout/{id}"))).build())?;
        let envelope: Envelope<WorkoutData> = self.fetch(request).await?;
        Ok(domain::Workout::try_from(envelope.data.workout)?)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let request = build(
            Request::put(&self.url(&format!("workout/{}", workout.id)))
                .json(&Workout::from(workout.clone())),
        )?;
        let body = self.fetch_text(request).await?;
        if body.trim().is_empty() {
            return Ok(workout);
        }
        let envelope: Envelope<WorkoutData> = serde_json::from_str(&body)
            .map_err(|err| domain::StorageError::Deserialization(err.to_string()))?;
        Ok(domain::Workout::try_from(envelope.data.workout)?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let request = build(Request::delete(&self.url(&format!("workout/{id}"))).build())?;
        self.fetch_no_content(request).await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::ExerciseProgressRepository for REST<S> {
    async fn read_exercise_series(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::ExerciseSeriesMap, domain::ReadError> {
        let url = self.url(&format!("workout/exercises/{user_id}"));
        let request = build(Request::get(&url).build())?;
        let envelope: Envelope<Map<String, Value>> = self.fetch(request).await?;
        Ok(exercise_series(envelope.data)?)
    }
}

fn build(request: Result<Request, gloo_net::Error>) -> Result<Request, domain::StorageError> {
    request.map_err(|err| domain::StorageError::Other(err.into()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workouts {
    pub workouts: Option<Vec<Workout>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutData {
    pub workout: Workout,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: u64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
}

impl TryFrom<Workout> for domain::Workout {
    type Error = domain::StorageError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(domain::Workout {
            id: value.id.into(),
            start_time: parse_timestamp(&value.start_time)?,
            end_time: parse_timestamp(&value.end_time)?,
            exercises: value
                .exercises
                .unwrap_or_default()
                .into_iter()
                .map(domain::Exercise::from)
                .collect(),
        })
    }
}

impl From<domain::Workout> for Workout {
    fn from(value: domain::Workout) -> Self {
        Workout {
            id: value.id.into(),
            start_time: value.start_time.format(TIMESTAMP_FORMAT).to_string(),
            end_time: value.end_time.format(TIMESTAMP_FORMAT).to_string(),
            exercises: Some(value.exercises.into_iter().map(Exercise::from).collect()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: u64,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        domain::Exercise {
            id: value.id.into(),
            name: value.exercise,
            sets: value.sets,
            reps: value.reps,
            weight: value.weight,
        }
    }
}

impl From<domain::Exercise> for Exercise {
    fn from(value: domain::Exercise) -> Self {
        Exercise {
            id: value.id.into(),
            exercise: value.name,
            sets: value.sets,
            reps: value.reps,
            weight: value.weight,
        }
    }
}

/// Parse an ISO 8601 timestamp, keeping the date and time as written.
///
/// An offset suffix is accepted but not applied.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, domain::StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|err| {
            domain::StorageError::Deserialization(format!("invalid timestamp {value:?}: {err}"))
        })
}

/// Convert the exercise object into a series map, keeping the key order of the response.
fn exercise_series(
    object: Map<String, Value>,
) -> Result<domain::ExerciseSeriesMap, domain::StorageError> {
    object
        .into_iter()
        .map(|(name, values)| {
            serde_json::from_value::<Option<Vec<f32>>>(values)
                .map(|series| (name, series.unwrap_or_default()))
                .map_err(|err| domain::StorageError::Deserialization(err.to_string()))
        })
        .collect()
}
