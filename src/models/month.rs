//! Month schedule model.
//!
//! Maps each day of one calendar month to the schedule module assigned to it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ScheduleModule;

/// The schedule of one employee for one calendar month.
///
/// Days are keyed by day-of-month; a day with no entry has no schedule.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Category, MonthSchedule, ScheduleModule};
/// use chrono::NaiveDate;
///
/// let mut schedule = MonthSchedule::new(2025, 12).unwrap();
/// schedule.assign(1, ScheduleModule::without_hours(Category::Off, "off"));
///
/// let first = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
/// let second = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
/// assert!(schedule.module_for(first).is_some());
/// assert!(schedule.module_for(second).is_none());
/// assert_eq!(schedule.days_in_month(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSchedule {
    year: i32,
    month: u32,
    days: BTreeMap<u32, ScheduleModule>,
}

impl MonthSchedule {
    /// Creates an empty schedule. Returns `None` for an invalid month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            year,
            month,
            days: BTreeMap::new(),
        })
    }

    /// The schedule year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The schedule month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Assigns a module to a day. Returns false, leaving the schedule untouched,
    /// when `day` is outside the month.
    pub fn assign(&mut self, day: u32, module: ScheduleModule) -> bool {
        if self.date(day).is_none() {
            return false;
        }
        self.days.insert(day, module);
        true
    }

    /// Returns the module for `date`, or `None` when unscheduled or outside this month.
    pub fn module_for(&self, date: NaiveDate) -> Option<&ScheduleModule> {
        if date.year() != self.year || date.month() != self.month {
            return None;
        }
        self.days.get(&date.day())
    }

    /// The date of a day-of-month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        (28..=31)
            .rev()
            .find(|day| self.date(*day).is_some())
            .unwrap_or(28)
    }

    /// Iterates over every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month()).filter_map(|day| self.date(day))
    }
}
