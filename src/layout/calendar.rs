//! Rest-day classification on the synthetic planning calendar.
//!
//! Months are a fixed `days_per_month` long and every week is a 7-day cycle
//! anchored at day 1, so day 6 and day 7 of each cycle are the weekend. This
//! is a layout calendar, not a wall-clock one.

use crate::model::WorkWeek;

const SATURDAY: i32 = 5;
const SUNDAY: i32 = 6;

/// Days held in the lookup table; later days are classified on demand.
const TABLE_DAYS: i32 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Work,
    Rest,
}

/// 1-based day index for a `(month, day_of_month)` pair.
pub fn day_of_year(month: i32, day_of_month: i32, days_per_month: i32) -> i32 {
    (month - 1) * days_per_month + day_of_month
}

/// Position of a day in its 7-day cycle, `0..7`.
pub fn day_of_week(day: i32) -> i32 {
    (day - 1).rem_euclid(7)
}

pub fn classify_day(day: i32, week: WorkWeek) -> DayKind {
    match day_of_week(day) {
        SATURDAY if !week.work_on_saturday => DayKind::Rest,
        SUNDAY if !week.work_on_sunday => DayKind::Rest,
        _ => DayKind::Work,
    }
}

/// Day classification over a fixed horizon, usable as a lookup table by the
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarShading {
    pub week: WorkWeek,
    pub days_per_month: i32,
    total_days: i32,
    /// `kinds[i]` classifies day `i + 1`, up to `TABLE_DAYS`.
    kinds: Vec<DayKind>,
}

impl CalendarShading {
    pub fn new(total_days: i32, days_per_month: i32, week: WorkWeek) -> Self {
        let total_days = total_days.max(0);
        let kinds = (1..=total_days.min(TABLE_DAYS))
            .map(|day| classify_day(day, week))
            .collect();
        Self {
            week,
            days_per_month,
            total_days,
            kinds,
        }
    }

    pub fn total_days(&self) -> i32 {
        self.total_days
    }

    /// Classify any day; days past the table horizon are computed directly.
    pub fn classify(&self, day: i32) -> DayKind {
        usize::try_from(day - 1)
            .ok()
            .and_then(|i| self.kinds.get(i).copied())
            .unwrap_or_else(|| classify_day(day, self.week))
    }

    pub fn classify_date(&self, month: i32, day_of_month: i32) -> DayKind {
        self.classify(day_of_year(month, day_of_month, self.days_per_month))
    }

    pub fn is_rest_day(&self, day: i32) -> bool {
        self.classify(day) == DayKind::Rest
    }

    /// All rest days inside the horizon, ascending.
    pub fn rest_days(&self) -> impl Iterator<Item = i32> + '_ {
        (1..=self.total_days).filter(move |&day| self.is_rest_day(day))
    }
}
