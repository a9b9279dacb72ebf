use std::fmt;

use crate::{ReadError, UserID};

#[allow(async_fn_in_trait)]
pub trait ExerciseProgressService {
    async fn get_exercise_series(&self, user_id: UserID) -> Result<ExerciseSeriesMap, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseProgressRepository {
    async fn read_exercise_series(&self, user_id: UserID)
    -> Result<ExerciseSeriesMap, ReadError>;
}

/// Chronological values per exercise name.
///
/// Iteration follows insertion order, which is the order in which the server sent the exercises.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseSeriesMap(Vec<(String, Vec<f32>)>);

impl ExerciseSeriesMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the series of an existing name without changing its position.
    pub fn insert(&mut self, name: String, series: Vec<f32>) {
        if let Some((_, existing)) = self.0.iter_mut().find(|(n, _)| *n == name) {
            *existing = series;
        } else {
            self.0.push((name, series));
        }
    }

    #[must_use]
    pub fn series(&self, name: &str) -> &[f32] {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, series)| series.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.names().next()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<f32>)> for ExerciseSeriesMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f32>)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, series) in iter {
            map.insert(name, series);
        }
        map
    }
}

/// The exercise to display: the explicit selection, or else the first exercise of the map.
#[must_use]
pub fn resolve_selection<'a>(
    map: &'a ExerciseSeriesMap,
    selected: Option<&'a str>,
) -> Option<&'a str> {
    selected.or_else(|| map.first_name())
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub current: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub percent_change: PercentChange,
    pub trend: Option<Trend>,
}

impl SeriesSummary {
    #[must_use]
    pub fn of(series: &[f32]) -> Self {
        Self {
            current: series.last().copied(),
            min: series.iter().copied().reduce(f32::min),
            max: series.iter().copied().reduce(f32::max),
            percent_change: PercentChange::of(series),
            trend: Trend::of(series),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum PercentChange {
    #[default]
    NotApplicable,
    Value(f32),
}

impl PercentChange {
    /// Change from the first to the last value.
    ///
    /// Not applicable for fewer than two values or a first value of zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn of(series: &[f32]) -> Self {
        let [first, .., last] = series else {
            return PercentChange::NotApplicable;
        };

        if *first == 0.0 {
            return PercentChange::NotApplicable;
        }

        let change = (last - first) / first * 100.0;

        if change.is_finite() {
            PercentChange::Value(change)
        } else {
            PercentChange::NotApplicable
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f32> {
        match self {
            PercentChange::NotApplicable => None,
            PercentChange::Value(value) => Some(value),
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PercentChange::NotApplicable => write!(f, "N/A"),
            PercentChange::Value(value) => write!(f, "{value:.1}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    #[must_use]
    pub fn of(series: &[f32]) -> Option<Self> {
        let [first, .., last] = series else {
            return None;
        };

        Some(if last > first {
            Trend::Up
        } else if last < first {
            Trend::Down
        } else {
            Trend::Flat
        })
    }
}
