//! Daily attendance result types.
//!
//! [`Metrics`] is the value returned by the classifier for one day: four
//! durations in seconds and the ordered status codes with their labels.

use serde::{Deserialize, Serialize};

use crate::config::StatusLabels;

/// A fixed-vocabulary classification attached to a day's outcome.
///
/// # Example
///
/// ```
/// use attendance_engine::models::StatusCode;
///
/// assert_eq!(StatusCode::NoSchedule.code(), "NOSCHEDULE");
/// assert_eq!(StatusCode::from_code("OVERTIME"), Some(StatusCode::Overtime));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCode {
    /// Regular day with no late arrival or early leave.
    #[serde(rename = "NORMAL")]
    Normal,
    /// Arrived after paid time started.
    #[serde(rename = "LATE")]
    Late,
    /// Left before paid time ended.
    #[serde(rename = "EARLY")]
    Early,
    /// Stayed past the last paid segment.
    #[serde(rename = "OVERTIME")]
    Overtime,
    /// Scheduled holiday work.
    #[serde(rename = "HOLIDAY")]
    Holiday,
    /// Paid leave.
    #[serde(rename = "PAY")]
    Pay,
    /// Unpaid leave.
    #[serde(rename = "NOPAY")]
    NoPay,
    /// Rostered off.
    #[serde(rename = "OFF")]
    Off,
    /// Punches inconsistent with the schedule.
    #[serde(rename = "ERROR")]
    Error,
    /// No usable schedule for the day.
    #[serde(rename = "NOSCHEDULE")]
    NoSchedule,
}

impl StatusCode {
    /// Every status code, in declaration order.
    pub const ALL: [StatusCode; 10] = [
        StatusCode::Normal,
        StatusCode::Late,
        StatusCode::Early,
        StatusCode::Overtime,
        StatusCode::Holiday,
        StatusCode::Pay,
        StatusCode::NoPay,
        StatusCode::Off,
        StatusCode::Error,
        StatusCode::NoSchedule,
    ];

    /// Returns the canonical upper-case code.
    pub fn code(&self) -> &'static str {
        match self {
            StatusCode::Normal => "NORMAL",
            StatusCode::Late => "LATE",
            StatusCode::Early => "EARLY",
            StatusCode::Overtime => "OVERTIME",
            StatusCode::Holiday => "HOLIDAY",
            StatusCode::Pay => "PAY",
            StatusCode::NoPay => "NOPAY",
            StatusCode::Off => "OFF",
            StatusCode::Error => "ERROR",
            StatusCode::NoSchedule => "NOSCHEDULE",
        }
    }

    /// Parses a canonical code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The classified outcome of one day, with durations in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Paid time that elapsed before check-in.
    pub late_seconds: i64,
    /// Paid time remaining after check-out.
    pub early_seconds: i64,
    /// Time between the last paid segment end and check-out.
    pub overtime_seconds: i64,
    /// Paid time worked on a holiday-work day.
    pub holiday_seconds: i64,
    /// Labels joined with `+`.
    pub status: String,
    /// Status codes in display order; the first is the primary badge.
    pub status_codes: Vec<StatusCode>,
    /// Display labels parallel to `status_codes`.
    pub status_labels: Vec<String>,
}

impl Metrics {
    /// Builds a result, deriving labels and the combined display string from `labels`.
    pub fn new(
        late_seconds: i64,
        early_seconds: i64,
        overtime_seconds: i64,
        holiday_seconds: i64,
        status_codes: Vec<StatusCode>,
        labels: &StatusLabels,
    ) -> Self {
        let status_labels: Vec<String> = status_codes
            .iter()
            .map(|code| labels.label(*code).to_string())
            .collect();
        let status = status_labels.join("+");

        Self {
            late_seconds,
            early_seconds,
            overtime_seconds,
            holiday_seconds,
            status,
            status_codes,
            status_labels,
        }
    }

    /// Returns the primary status code, if any.
    pub fn primary(&self) -> Option<StatusCode> {
        self.status_codes.first().copied()
    }

    /// Returns true when `code` is among the status codes.
    pub fn has(&self, code: StatusCode) -> bool {
        self.status_codes.contains(&code)
    }

    /// Converts to whole minutes, truncating each duration.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::StatusLabels;
    /// use attendance_engine::models::{Metrics, StatusCode};
    ///
    /// let metrics = Metrics::new(119, 0, 3_600, 0, vec![StatusCode::Late], &StatusLabels::default());
    /// let minutes = metrics.to_minutes();
    /// assert_eq!(minutes.late_minutes, 1);
    /// assert_eq!(minutes.overtime_minutes, 60);
    /// ```
    pub fn to_minutes(&self) -> MinuteMetrics {
        MinuteMetrics {
            late_minutes: self.late_seconds / 60,
            early_minutes: self.early_seconds / 60,
            overtime_minutes: self.overtime_seconds / 60,
            holiday_minutes: self.holiday_seconds / 60,
            status: self.status.clone(),
            status_codes: self.status_codes.clone(),
            status_labels: self.status_labels.clone(),
        }
    }
}

/// Minute-precision view of [`Metrics`] for callers that report in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteMetrics {
    /// Late minutes.
    pub late_minutes: i64,
    /// Early-leave minutes.
    pub early_minutes: i64,
    /// Overtime minutes.
    pub overtime_minutes: i64,
    /// Holiday-work minutes.
    pub holiday_minutes: i64,
    /// Labels joined with `+`.
    pub status: String,
    /// Status codes in display order.
    pub status_codes: Vec<StatusCode>,
    /// Display labels parallel to `status_codes`.
    pub status_labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_for_every_status() {
        for status in StatusCode::ALL {
            assert_eq!(StatusCode::from_code(status.code()), Some(status));
        }
        assert_eq!(StatusCode::from_code("REGULAR"), None);
    }

    #[test]
    fn test_status_code_serializes_as_code() {
        assert_eq!(serde_json::to_string(&StatusCode::NoPay).unwrap(), "\"NOPAY\"");
        assert_eq!(serde_json::to_string(&StatusCode::NoSchedule).unwrap(), "\"NOSCHEDULE\"");
        let parsed: StatusCode = serde_json::from_str("\"EARLY\"").unwrap();
        assert_eq!(parsed, StatusCode::Early);
    }

    #[test]
    fn test_labels_join_with_plus() {
        let metrics = Metrics::new(
            600,
            600,
            0,
            0,
            vec![StatusCode::Late, StatusCode::Early],
            &StatusLabels::default(),
        );
        assert_eq!(metrics.status_labels, vec!["지각", "조퇴"]);
        assert_eq!(metrics.status, "지각+조퇴");
        assert_eq!(metrics.primary(), Some(StatusCode::Late));
        assert!(metrics.has(StatusCode::Early));
        assert!(!metrics.has(StatusCode::Normal));
    }

    #[test]
    fn test_empty_codes_give_empty_status() {
        let metrics = Metrics::new(0, 0, 0, 0, vec![], &StatusLabels::default());
        assert_eq!(metrics.status, "");
        assert!(metrics.status_labels.is_empty());
        assert_eq!(metrics.primary(), None);
    }

    #[test]
    fn test_to_minutes_truncates() {
        let metrics = Metrics::new(59, 61, 0, 28_800, vec![StatusCode::Holiday], &StatusLabels::default());
        let minutes = metrics.to_minutes();
        assert_eq!(minutes.late_minutes, 0);
        assert_eq!(minutes.early_minutes, 1);
        assert_eq!(minutes.holiday_minutes, 480);
        assert_eq!(minutes.status_codes, vec![StatusCode::Holiday]);
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = Metrics::new(0, 0, 1_800, 0, vec![StatusCode::Overtime], &StatusLabels::default());
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["status_codes"], serde_json::json!(["OVERTIME"]));
        assert_eq!(json["overtime_seconds"], 1_800);
    }
}
