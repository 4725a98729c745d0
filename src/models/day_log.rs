//! Punch logs for a single day.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time_of_day::{parse_time_of_day, serde_opt};

/// Direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunchKind {
    /// Check-in (work code `I`).
    #[serde(rename = "I", alias = "in")]
    In,
    /// Check-out (work code `O`).
    #[serde(rename = "O", alias = "out")]
    Out,
}

/// A single raw punch as recorded by a terminal or the mobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// Whether this is a check-in or a check-out.
    pub kind: PunchKind,
    /// When the punch was recorded.
    pub at: NaiveDateTime,
}

/// The reduced attendance input for one employee on one day.
///
/// Holds the earliest check-in and the latest check-out as times of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLog {
    /// First check-in of the day.
    #[serde(default, with = "serde_opt")]
    pub checkin: Option<NaiveTime>,
    /// Last check-out of the day.
    #[serde(default, with = "serde_opt")]
    pub checkout: Option<NaiveTime>,
}

impl DayLog {
    /// Creates a log from already-parsed times.
    pub fn new(checkin: Option<NaiveTime>, checkout: Option<NaiveTime>) -> Self {
        Self { checkin, checkout }
    }

    /// Creates a log from boundary strings. Sentinels and malformed values become absent.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DayLog;
    ///
    /// let log = DayLog::from_strs(Some("09:00"), Some("-"));
    /// assert!(log.checkin.is_some());
    /// assert!(log.checkout.is_none());
    /// ```
    pub fn from_strs(checkin: Option<&str>, checkout: Option<&str>) -> Self {
        Self {
            checkin: checkin.and_then(parse_time_of_day),
            checkout: checkout.and_then(parse_time_of_day),
        }
    }

    /// Reduces a day's punches to the earliest check-in and latest check-out.
    ///
    /// Punches are expected to belong to a single calendar day; only their time
    /// of day is kept.
    pub fn from_punches(punches: &[Punch]) -> Self {
        let checkin = punches
            .iter()
            .filter(|p| p.kind == PunchKind::In)
            .map(|p| p.at)
            .min();
        let checkout = punches
            .iter()
            .filter(|p| p.kind == PunchKind::Out)
            .map(|p| p.at)
            .max();

        Self {
            checkin: checkin.map(|at| at.time()),
            checkout: checkout.map(|at| at.time()),
        }
    }

    /// Returns true when at least one punch is present.
    pub fn has_any(&self) -> bool {
        self.checkin.is_some() || self.checkout.is_some()
    }

    /// Returns true when both punches are present.
    pub fn is_complete(&self) -> bool {
        self.checkin.is_some() && self.checkout.is_some()
    }
}
