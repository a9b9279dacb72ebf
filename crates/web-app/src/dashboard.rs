//! Personal dashboard
//!
//! Shows the workouts of the current month, the longest streak within them, and the progress of
//! a selected exercise. Every activation of the view refreshes the data. Results of a refresh are
//! only applied if no newer refresh was started in the meantime.

use std::{cell::RefCell, error::Error};

use chrono::{Local, NaiveDate};
use futures_util::future::join;
use gym_tracker_domain::{
    Consistency, ExerciseProgressService, ExerciseSeriesMap, SeriesSummary, SessionService,
    Workout, WorkoutService, resolve_selection, workouts_in_month,
};
use log::{debug, warn};

use crate::{
    Notifier, Settings,
    chart::{ChartOptions, plot_series},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

#[derive(Debug, Default)]
pub struct Dashboard {
    workouts: Vec<Workout>,
    series: ExerciseSeriesMap,
    selected: Option<String>,
    latest_refresh: u64,
    loading: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh and supersede all refreshes started before.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.latest_refresh += 1;
        self.loading = true;
        RefreshToken(self.latest_refresh)
    }

    #[must_use]
    pub fn is_current(&self, token: RefreshToken) -> bool {
        token.0 == self.latest_refresh
    }

    /// Replace the dashboard data with the result of a refresh.
    ///
    /// Returns false and leaves the state untouched if the refresh has been superseded.
    pub fn complete_refresh(
        &mut self,
        token: RefreshToken,
        workouts: Vec<Workout>,
        series: ExerciseSeriesMap,
        today: NaiveDate,
    ) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.workouts = workouts_in_month(&workouts, today);
        self.series = series;
        if self
            .selected
            .as_deref()
            .is_none_or(|name| !self.series.contains(name))
        {
            self.selected = self.series.first_name().map(String::from);
        }
        self.loading = false;

        true
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn monthly_workouts(&self) -> &[Workout] {
        &self.workouts
    }

    #[must_use]
    pub fn consistency(&self) -> Consistency {
        Consistency::of(&self.workouts)
    }

    pub fn exercise_names(&self) -> impl Iterator<Item = &str> {
        self.series.names()
    }

    pub fn select(&mut self, name: &str) {
        self.selected = Some(name.to_string());
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        resolve_selection(&self.series, self.selected.as_deref())
    }

    #[must_use]
    pub fn selected_series(&self) -> &[f32] {
        self.selected()
            .map(|name| self.series.series(name))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary::of(self.selected_series())
    }

    /// Render the selected series as an SVG chart sized and colored according to the settings.
    #[allow(clippy::missing_errors_doc)]
    pub fn chart(&self, settings: &Settings) -> Result<Option<String>, Box<dyn Error>> {
        let options = ChartOptions {
            width: settings.chart_width,
            ..ChartOptions::default()
        };
        plot_series(self.selected_series(), &options, settings.current_theme())
    }

    #[must_use]
    pub fn title(&self) -> String {
        match self.selected() {
            Some(name) => format!("{name} Progress"),
            None => String::from("Workout Progress"),
        }
    }
}

/// Refresh the dashboard for the current month of the local clock.
pub async fn refresh_now<S, N>(dashboard: &RefCell<Dashboard>, service: &S, notifier: &N)
where
    S: SessionService + WorkoutService + ExerciseProgressService,
    N: Notifier,
{
    refresh(dashboard, service, notifier, Local::now().date_naive()).await;
}

/// Fetch workouts and exercise progress of the current user and apply them to the dashboard.
///
/// Failed fetches leave the affected part of the dashboard empty and notify the user.
pub async fn refresh<S, N>(
    dashboard: &RefCell<Dashboard>,
    service: &S,
    notifier: &N,
    today: NaiveDate,
) where
    S: SessionService + WorkoutService + ExerciseProgressService,
    N: Notifier,
{
    let token = dashboard.borrow_mut().begin_refresh();

    let user = match service.get_current_user().await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            warn!("no user signed in");
            None
        }
        Err(_) => None,
    };

    let Some(user) = user else {
        if dashboard.borrow_mut().complete_refresh(
            token,
            vec![],
            ExerciseSeriesMap::new(),
            today,
        ) {
            notifier.alert("Error", "User not authenticated");
        }
        return;
    };

    let (workouts, series) = join(
        service.get_workouts(user.id),
        service.get_exercise_series(user.id),
    )
    .await;

    let workouts_failed = workouts.is_err();
    let series_failed = series.is_err();

    let applied = dashboard.borrow_mut().complete_refresh(
        token,
        workouts.unwrap_or_default(),
        series.unwrap_or_default(),
        today,
    );

    if !applied {
        debug!("discarded superseded dashboard refresh");
        return;
    }

    if workouts_failed {
        notifier.alert("Error", "Failed to load workout data.");
    }
    if series_failed {
        notifier.alert("Error", "Failed to load workouts of user.");
    }
}
