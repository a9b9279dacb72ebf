#![warn(clippy::pedantic)]

pub mod chart;
pub mod dashboard;
pub mod log;
pub mod notification;
pub mod service;
pub mod settings;
pub mod workout_editor;


pub use notification::{BrowserNotifier, Notifier};
pub use settings::{LogLevel, Settings, SettingsRepository, SettingsService, Theme};
