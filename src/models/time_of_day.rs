//! Time-of-day parsing and formatting.
//!
//! Schedules and punch logs exchange wall-clock times as `"HH:MM"` or
//! `"HH:MM:SS"` strings, with `"-"` or an empty string meaning "not applicable".
//! This module is the single place that interprets that convention.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Sentinel used by schedule rows for an unset time.
pub const UNSET: &str = "-";

/// Parses a time-of-day leniently.
///
/// Sentinels (`""`, `"-"`) and anything that is not a valid `HH:MM` or
/// `HH:MM:SS` time are treated as absent.
///
/// # Example
///
/// ```
/// use attendance_engine::models::time_of_day::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time_of_day("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
/// assert_eq!(parse_time_of_day("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
/// assert_eq!(parse_time_of_day("-"), None);
/// assert_eq!(parse_time_of_day("9:30"), None);
/// ```
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    parse_time_of_day_strict(value).ok().flatten()
}

/// Parses a time-of-day, rejecting malformed values.
///
/// Returns `Ok(None)` for the sentinels and [`EngineError::InvalidTimeOfDay`]
/// for any other value that does not parse.
pub fn parse_time_of_day_strict(value: &str) -> EngineResult<Option<NaiveTime>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == UNSET {
        return Ok(None);
    }

    let widened = match trimmed.len() {
        5 => format!("{}:00", trimmed),
        8 => trimmed.to_string(),
        _ => {
            return Err(EngineError::InvalidTimeOfDay {
                value: value.to_string(),
            });
        }
    };

    NaiveTime::parse_from_str(&widened, "%H:%M:%S")
        .map(Some)
        .map_err(|_| EngineError::InvalidTimeOfDay {
            value: value.to_string(),
        })
}

/// Combines a date with a time-of-day string; absent or unparseable input stays absent.
///
/// # Example
///
/// ```
/// use attendance_engine::models::time_of_day::to_instant;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
/// let instant = to_instant(day, Some("18:00")).unwrap();
/// assert_eq!(instant.to_string(), "2025-12-10 18:00:00");
/// assert!(to_instant(day, Some("-")).is_none());
/// assert!(to_instant(day, None).is_none());
/// ```
pub fn to_instant(day: NaiveDate, value: Option<&str>) -> Option<NaiveDateTime> {
    value
        .and_then(parse_time_of_day)
        .map(|time| day.and_time(time))
}

/// Formats a time-of-day as `HH:MM`, or `HH:MM:SS` when seconds are present.
pub fn format_time_of_day(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Formats a number of seconds as `HH:MM:SS`. Hours are not wrapped at 24.
///
/// # Example
///
/// ```
/// use attendance_engine::models::time_of_day::format_duration;
///
/// assert_eq!(format_duration(0), "00:00:00");
/// assert_eq!(format_duration(3_725), "01:02:05");
/// assert_eq!(format_duration(100 * 3_600), "100:00:00");
/// ```
pub fn format_duration(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Converts seconds to hours rounded to two decimal places.
pub fn seconds_to_hours(total_seconds: i64) -> Decimal {
    (Decimal::new(total_seconds, 0) / Decimal::new(3_600, 0)).round_dp(2)
}

/// Serde adapter for optional time-of-day fields.
///
/// Deserializes `"HH:MM"`, `"HH:MM:SS"`, `"-"`, `""` and `null`; malformed
/// strings are rejected. Serializes with [`format_time_of_day`].
pub mod serde_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::{format_time_of_day, parse_time_of_day_strict};

    /// Serializes an optional time-of-day.
    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&format_time_of_day(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional time-of-day.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(value) => parse_time_of_day_strict(&value).map_err(de::Error::custom),
        }
    }
}
