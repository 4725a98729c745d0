//! Configuration types for attendance classification.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{ScheduleModule, StatusCode};

/// Display labels for status codes.
///
/// The default table carries the Korean labels of the attendance UI. A code
/// missing from a loaded table is displayed as its own code.
///
/// # Example
///
/// ```
/// use attendance_engine::config::StatusLabels;
/// use attendance_engine::models::StatusCode;
/// use std::collections::HashMap;
///
/// assert_eq!(StatusLabels::default().label(StatusCode::Late), "지각");
///
/// let custom = StatusLabels::from_map(HashMap::from([("LATE".to_string(), "Late".to_string())]));
/// assert_eq!(custom.label(StatusCode::Late), "Late");
/// assert_eq!(custom.label(StatusCode::Early), "EARLY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLabels {
    labels: HashMap<String, String>,
}

impl StatusLabels {
    /// Creates a label table from code → label pairs.
    pub fn from_map(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    /// Returns the label for `code`, or the code itself when no label is defined.
    pub fn label(&self, code: StatusCode) -> &str {
        self.labels
            .get(code.code())
            .map(String::as_str)
            .unwrap_or_else(|| code.code())
    }

    /// Keys of the table that are not status codes.
    pub fn unknown_codes(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .labels
            .keys()
            .map(String::as_str)
            .filter(|key| StatusCode::from_code(key).is_none())
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        let labels = [
            (StatusCode::Normal, "정상"),
            (StatusCode::Late, "지각"),
            (StatusCode::Early, "조퇴"),
            (StatusCode::Overtime, "연장"),
            (StatusCode::Holiday, "휴일근로"),
            (StatusCode::Pay, "유급휴무"),
            (StatusCode::NoPay, "무급휴무"),
            (StatusCode::Off, "OFF"),
            (StatusCode::Error, "오류"),
            (StatusCode::NoSchedule, "미편성"),
        ]
        .into_iter()
        .map(|(code, label)| (code.code().to_string(), label.to_string()))
        .collect();

        Self { labels }
    }
}

/// Policy switches for the classifier and the monthly builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    /// Mark today as `ERROR` once `now` has passed the scheduled start with no punches.
    pub flag_missing_punches_after_start_today: bool,
    /// On past days with a check-in but no check-out, take the scheduled end as check-out.
    pub infer_checkout_from_schedule_end: bool,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            flag_missing_punches_after_start_today: false,
            infer_checkout_from_schedule_end: true,
        }
    }
}

/// The complete classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Status labels.
    labels: StatusLabels,
    /// Policy switches.
    policy: ClassifierPolicy,
}

impl EngineConfig {
    /// Creates a configuration from its component parts.
    pub fn new(labels: StatusLabels, policy: ClassifierPolicy) -> Self {
        Self { labels, policy }
    }

    /// Returns the status labels.
    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }

    /// Returns the policy switches.
    pub fn policy(&self) -> ClassifierPolicy {
        self.policy
    }
}

/// Month schedule file structure.
///
/// ```yaml
/// year: 2025
/// month: 12
/// modules:
///   office:
///     cat: 소정근로
///     start_time: "09:00"
///     end_time: "18:00"
///     rest1: { start: "12:00", end: "13:00" }
/// days:
///   1: office
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MonthScheduleFile {
    /// Schedule year.
    pub year: i32,
    /// Schedule month (1-12).
    pub month: u32,
    /// Module catalogue keyed by module name.
    #[serde(default)]
    pub modules: HashMap<String, ScheduleModule>,
    /// Day-of-month → module name.
    #[serde(default)]
    pub days: BTreeMap<u32, String>,
}
