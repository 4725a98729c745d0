//! Schedule module and category types.
//!
//! A [`ScheduleModule`] is one row of a work schedule for one day: its category,
//! the work span, and up to two rest windows.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::time_of_day::serde_opt;

/// The category a schedule module belongs to.
///
/// Parsed from the tags used by schedule rows. Both the Korean tags of the
/// source scheduling system and snake_case English tags are accepted; any other
/// tag is kept as [`Category::Unrecognized`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::Category;
///
/// assert_eq!(Category::from_tag("소정근로"), Category::RegularWork);
/// assert_eq!(Category::from_tag("holiday_work"), Category::HolidayWork);
/// assert_eq!(Category::from_tag("OFF"), Category::Off);
/// assert!(matches!(Category::from_tag("출장"), Category::Unrecognized(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Scheduled regular working day.
    RegularWork,
    /// Work scheduled on a holiday.
    HolidayWork,
    /// Paid day off.
    PaidLeave,
    /// Unpaid day off.
    UnpaidLeave,
    /// Rostered off day.
    Off,
    /// A tag the engine does not know.
    Unrecognized(String),
}

impl Category {
    /// Maps a schedule tag to a category.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "소정근로" | "정규근무" | "regular_work" => Category::RegularWork,
            "휴일근로" | "휴일근무" | "holiday_work" => Category::HolidayWork,
            "유급휴무" | "paid_leave" => Category::PaidLeave,
            "무급휴무" | "unpaid_leave" => Category::UnpaidLeave,
            "OFF" | "off" => Category::Off,
            other => Category::Unrecognized(other.to_string()),
        }
    }

    /// Returns the canonical tag for this category.
    pub fn tag(&self) -> &str {
        match self {
            Category::RegularWork => "regular_work",
            Category::HolidayWork => "holiday_work",
            Category::PaidLeave => "paid_leave",
            Category::UnpaidLeave => "unpaid_leave",
            Category::Off => "off",
            Category::Unrecognized(tag) => tag,
        }
    }

    /// Returns true for the categories on which the employee is expected to work.
    pub fn is_work(&self) -> bool {
        matches!(self, Category::RegularWork | Category::HolidayWork)
    }

    /// Returns true for leave and off categories, which must carry no punches.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            Category::PaidLeave | Category::UnpaidLeave | Category::Off
        )
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Category::from_tag(&tag)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.tag().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A rest window carved out of the work span. Either end may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestWindow {
    /// Start of the rest window.
    #[serde(default, with = "serde_opt")]
    pub start: Option<NaiveTime>,
    /// End of the rest window.
    #[serde(default, with = "serde_opt")]
    pub end: Option<NaiveTime>,
}

impl RestWindow {
    /// Creates a rest window with both ends set.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns the window bounds when both ends are set and `end > start`.
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => Some((start, end)),
            _ => None,
        }
    }
}

/// One schedule row for one day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Category, RestWindow, ScheduleModule};
/// use chrono::NaiveTime;
///
/// let module = ScheduleModule::new(
///     Category::RegularWork,
///     "Office",
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
/// )
/// .with_rest(RestWindow::new(
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// ));
/// assert_eq!(module.rest_windows().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleModule {
    /// The category tag.
    #[serde(rename = "cat", alias = "category")]
    pub category: Category,
    /// Display name of the module.
    #[serde(default)]
    pub name: String,
    /// Work start.
    #[serde(default, with = "serde_opt")]
    pub start_time: Option<NaiveTime>,
    /// Work end.
    #[serde(default, with = "serde_opt")]
    pub end_time: Option<NaiveTime>,
    /// First rest window.
    #[serde(default)]
    pub rest1: RestWindow,
    /// Second rest window.
    #[serde(default)]
    pub rest2: RestWindow,
}

impl ScheduleModule {
    /// Creates a module with a work span and no rest windows.
    pub fn new(
        category: Category,
        name: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            start_time: Some(start_time),
            end_time: Some(end_time),
            rest1: RestWindow::default(),
            rest2: RestWindow::default(),
        }
    }

    /// Creates a module with no work span, as used for leave and off days.
    pub fn without_hours(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            start_time: None,
            end_time: None,
            rest1: RestWindow::default(),
            rest2: RestWindow::default(),
        }
    }

    /// Fills the first unset rest slot. A third window is ignored.
    pub fn with_rest(mut self, rest: RestWindow) -> Self {
        if self.rest1 == RestWindow::default() {
            self.rest1 = rest;
        } else if self.rest2 == RestWindow::default() {
            self.rest2 = rest;
        }
        self
    }

    /// Returns the work span when both ends are set and `end > start`.
    pub fn work_span(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end > start => Some((start, end)),
            _ => None,
        }
    }

    /// Iterates over the valid rest windows in slot order.
    pub fn rest_windows(&self) -> impl Iterator<Item = (NaiveTime, NaiveTime)> + '_ {
        [self.rest1, self.rest2]
            .into_iter()
            .filter_map(|rest| rest.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(Category::from_tag("정규근무"), Category::RegularWork);
        assert_eq!(Category::from_tag("휴일근무"), Category::HolidayWork);
        assert_eq!(Category::from_tag("유급휴무"), Category::PaidLeave);
        assert_eq!(Category::from_tag("무급휴무"), Category::UnpaidLeave);
        assert_eq!(Category::from_tag("off"), Category::Off);
        assert_eq!(
            Category::from_tag("알수없음"),
            Category::Unrecognized("알수없음".to_string())
        );
    }

    #[test]
    fn test_category_groups() {
        assert!(Category::RegularWork.is_work());
        assert!(Category::HolidayWork.is_work());
        assert!(!Category::Off.is_work());
        assert!(Category::PaidLeave.is_absence());
        assert!(!Category::Unrecognized("x".to_string()).is_absence());
        assert!(!Category::Unrecognized("x".to_string()).is_work());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::HolidayWork).unwrap();
        assert_eq!(json, "\"holiday_work\"");

        let parsed: Category = serde_json::from_str("\"휴일근로\"").unwrap();
        assert_eq!(parsed, Category::HolidayWork);
    }

    #[test]
    fn test_rest_window_bounds_require_positive_length() {
        assert_eq!(RestWindow::new(t(12, 0), t(13, 0)).bounds(), Some((t(12, 0), t(13, 0))));
        assert_eq!(RestWindow::new(t(13, 0), t(12, 0)).bounds(), None);
        assert_eq!(RestWindow::new(t(12, 0), t(12, 0)).bounds(), None);
        assert_eq!(RestWindow::default().bounds(), None);
    }

    #[test]
    fn test_with_rest_fills_two_slots() {
        let module = ScheduleModule::new(Category::RegularWork, "long", t(9, 0), t(21, 0))
            .with_rest(RestWindow::new(t(12, 0), t(13, 0)))
            .with_rest(RestWindow::new(t(18, 0), t(18, 30)))
            .with_rest(RestWindow::new(t(20, 0), t(20, 30)));

        let rests: Vec<_> = module.rest_windows().collect();
        assert_eq!(rests, vec![(t(12, 0), t(13, 0)), (t(18, 0), t(18, 30))]);
    }

    #[test]
    fn test_work_span() {
        let module = ScheduleModule::new(Category::RegularWork, "office", t(9, 0), t(18, 0));
        assert_eq!(module.work_span(), Some((t(9, 0), t(18, 0))));

        let inverted = ScheduleModule::new(Category::RegularWork, "night", t(22, 0), t(6, 0));
        assert_eq!(inverted.work_span(), None);

        let off = ScheduleModule::without_hours(Category::Off, "off");
        assert_eq!(off.work_span(), None);
    }

    #[test]
    fn test_module_deserialization_with_sentinels() {
        let json = r#"{
            "cat": "소정근로",
            "name": "일반근무",
            "start_time": "09:00",
            "end_time": "18:00",
            "rest1": {"start": "12:00", "end": "13:00"},
            "rest2": {"start": "-", "end": ""}
        }"#;

        let module: ScheduleModule = serde_json::from_str(json).unwrap();
        assert_eq!(module.category, Category::RegularWork);
        assert_eq!(module.start_time, Some(t(9, 0)));
        assert_eq!(module.rest2, RestWindow::default());
        assert_eq!(module.rest_windows().count(), 1);
    }

    #[test]
    fn test_module_deserialization_rejects_malformed_time() {
        let json = r#"{"cat": "OFF", "start_time": "9시"}"#;
        assert!(serde_json::from_str::<ScheduleModule>(json).is_err());
    }
}
