use std::{collections::BTreeSet, iter::zip};

use chrono::{Datelike, NaiveDate};

use crate::Workout;

/// Workouts that started in the same month as `today`, in input order.
///
/// Only the month number is compared. Workouts of the same month in another year are included.
#[must_use]
pub fn workouts_in_month(workouts: &[Workout], today: NaiveDate) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| w.date().month() == today.month())
        .cloned()
        .collect()
}

/// Length of the longest run of consecutive calendar days with at least one workout.
#[must_use]
pub fn longest_streak(workouts: &[Workout]) -> u32 {
    longest_streak_of_dates(workouts.iter().map(Workout::date))
}

#[must_use]
pub fn longest_streak_of_dates(dates: impl IntoIterator<Item = NaiveDate>) -> u32 {
    let dates = dates.into_iter().collect::<BTreeSet<_>>();

    if dates.is_empty() {
        return 0;
    }

    let mut max_streak = 1;
    let mut current_streak = 1;

    for (prev, curr) in zip(&dates, dates.iter().skip(1)) {
        if (*curr - *prev).num_days() == 1 {
            current_streak += 1;
            max_streak = u32::max(max_streak, current_streak);
        } else {
            current_streak = 1;
        }
    }

    max_streak
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Consistency {
    pub workouts: usize,
    pub longest_streak: u32,
}

impl Consistency {
    #[must_use]
    pub fn of(workouts: &[Workout]) -> Self {
        Self {
            workouts: workouts.len(),
            longest_streak: longest_streak(workouts),
        }
    }
}
