use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use gym_tracker_domain as domain;
use gym_tracker_web_app::{Settings, SettingsRepository, log};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

const KEY_USER: &str = "user";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

/// Read a value from local storage, treating a missing key as absent.
fn get<T: DeserializeOwned>(key: &str) -> Result<Option<T>, gloo_storage::errors::StorageError> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(Some(value)),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

/// The signed-in user as stored by the login flow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub user_id: u64,
}

impl From<StoredUser> for domain::User {
    fn from(value: StoredUser) -> Self {
        domain::User {
            id: value.user_id.into(),
        }
    }
}

impl From<domain::User> for StoredUser {
    fn from(value: domain::User) -> Self {
        StoredUser {
            user_id: value.id.into(),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct Session;

impl Session {
    /// # Errors
    ///
    /// Returns an error if the user could not be serialized or stored.
    pub fn write_current_user(&self, user: domain::User) -> Result<(), domain::UpdateError> {
        gloo_storage::LocalStorage::set(KEY_USER, StoredUser::from(user))
            .map_err(|err| domain::UpdateError::Other(err.into()))
    }

    pub fn clear_current_user(&self) {
        gloo_storage::LocalStorage::delete(KEY_USER);
    }
}

impl domain::SessionRepository for Session {
    async fn read_current_user(&self) -> Result<Option<domain::User>, domain::ReadError> {
        get::<StoredUser>(KEY_USER)
            .map(|user| user.map(domain::User::from))
            .map_err(|err| domain::StorageError::Deserialization(err.to_string()).into())
    }
}

#[derive(Clone, Copy, Default)]
pub struct UI;

impl SettingsRepository for UI {
    async fn read_settings(&self) -> Result<Settings, String> {
        get(KEY_SETTINGS)
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        get(KEY_LOG)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
