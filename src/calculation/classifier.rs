//! Daily attendance classification.
//!
//! Combines a day's paid segments with its first check-in and last check-out
//! to produce late, early-leave, overtime and holiday-work durations, and the
//! ordered status codes for the day.
//!
//! The result depends only on the arguments. `now` is passed in explicitly so a
//! batch (for example every day of a month) can be evaluated against a single
//! fixed instant.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{Category, DayLog, Metrics, ScheduleModule, StatusCode};

use super::paid_segments::build_paid_segments;
use super::segments::{
    Segment, duration_after, duration_before, intersection_duration, latest_end, total_duration,
};

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Where a day lies relative to the evaluation instant.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayPosition;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let day = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
/// assert_eq!(DayPosition::of(day, now), DayPosition::Future);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPosition {
    /// Before today.
    Past,
    /// The same calendar date as `now`.
    Today,
    /// After today.
    Future,
}

impl DayPosition {
    /// Classifies `day` against the date of `now`.
    pub fn of(day: NaiveDate, now: NaiveDateTime) -> Self {
        let today = now.date();
        if day > today {
            DayPosition::Future
        } else if day == today {
            DayPosition::Today
        } else {
            DayPosition::Past
        }
    }
}

/// Overtime seconds: time from the last paid segment end to check-out.
///
/// Zero when either punch is absent, when there are no paid segments, or when
/// the stay never overlapped paid time before the last paid end.
pub fn compute_overtime(
    checkin: Option<NaiveDateTime>,
    checkout: Option<NaiveDateTime>,
    segments: &[Segment],
) -> i64 {
    let (Some(checkin), Some(checkout)) = (checkin, checkout) else {
        return 0;
    };
    let Some(last_end) = latest_end(segments) else {
        return 0;
    };

    // A stay with no paid overlap earns no overtime
    if intersection_duration(Some(checkin), Some(checkout.min(last_end)), segments) == 0 {
        return 0;
    }

    if checkout > last_end {
        (checkout - last_end).num_seconds()
    } else {
        0
    }
}

/// Holiday-work seconds: paid time covered by the stay on a holiday-work day.
pub fn compute_holiday(
    category: Option<&Category>,
    checkin: Option<NaiveDateTime>,
    checkout: Option<NaiveDateTime>,
    segments: &[Segment],
) -> i64 {
    if category != Some(&Category::HolidayWork) {
        return 0;
    }
    intersection_duration(checkin, checkout, segments)
}

/// Intermediate facts about one day, shared by the duration and status steps.
#[derive(Debug)]
struct DayFacts {
    position: DayPosition,
    checkin: Option<NaiveDateTime>,
    checkout: Option<NaiveDateTime>,
    paid_total: i64,
    presence_paid: i64,
    late: i64,
    early: i64,
    overtime: i64,
}

impl DayFacts {
    fn has_any_punch(&self) -> bool {
        self.checkin.is_some() || self.checkout.is_some()
    }

    fn has_both_punches(&self) -> bool {
        self.checkin.is_some() && self.checkout.is_some()
    }

    /// Both punches exist, the schedule has paid time, and the stay missed all of it.
    fn stay_misses_paid_time(&self) -> bool {
        self.has_both_punches() && self.paid_total > 0 && self.presence_paid == 0
    }
}

/// Classifies attendance days with a given label table and policy.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::Classifier;
/// use attendance_engine::models::{Category, DayLog, RestWindow, ScheduleModule, StatusCode};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let module = ScheduleModule::new(Category::RegularWork, "office", t(9, 0), t(18, 0))
///     .with_rest(RestWindow::new(t(12, 0), t(13, 0)));
/// let day = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
/// let now = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap().and_hms_opt(10, 0, 0).unwrap();
///
/// let classifier = Classifier::default();
/// let metrics = classifier.classify_day(day, Some(&module), &DayLog::from_strs(Some("09:10"), Some("18:00")), now);
///
/// assert_eq!(metrics.status_codes, vec![StatusCode::Late]);
/// assert_eq!(metrics.late_seconds, 600);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: EngineConfig,
}

impl Classifier {
    /// Creates a classifier from a configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classifies one day.
    ///
    /// Never fails: a missing module, an empty log, and every combination of
    /// category and day position map to a defined result.
    pub fn classify_day(
        &self,
        day: NaiveDate,
        module: Option<&ScheduleModule>,
        log: &DayLog,
        now: NaiveDateTime,
    ) -> Metrics {
        let paid_segments = build_paid_segments(day, module);
        let paid_total = total_duration(&paid_segments);

        let checkin = log.checkin.map(|time| day.and_time(time));
        let checkout = log.checkout.map(|time| day.and_time(time));

        let presence_paid = if checkin.is_some() && checkout.is_some() {
            intersection_duration(checkin, checkout, &paid_segments)
        } else {
            0
        };

        let facts = DayFacts {
            position: DayPosition::of(day, now),
            checkin,
            checkout,
            paid_total,
            presence_paid,
            late: duration_before(checkin, &paid_segments),
            early: duration_after(checkout, &paid_segments),
            overtime: compute_overtime(checkin, checkout, &paid_segments),
        };
        let holiday = compute_holiday(
            module.map(|m| &m.category),
            checkin,
            checkout,
            &paid_segments,
        );

        let status_codes = self.status_codes(day, module, &facts, now);

        debug!(
            day = %day,
            category = module.map(|m| m.category.tag()).unwrap_or("none"),
            position = ?facts.position,
            codes = ?status_codes,
            late = facts.late,
            early = facts.early,
            overtime = facts.overtime,
            holiday,
            "Classified attendance day"
        );

        // An erroneous day contributes no durations
        if status_codes == [StatusCode::Error] {
            return Metrics::new(0, 0, 0, 0, status_codes, self.config.labels());
        }

        Metrics::new(
            facts.late,
            facts.early,
            facts.overtime,
            holiday,
            status_codes,
            self.config.labels(),
        )
    }

    fn status_codes(
        &self,
        day: NaiveDate,
        module: Option<&ScheduleModule>,
        facts: &DayFacts,
        now: NaiveDateTime,
    ) -> Vec<StatusCode> {
        let Some(module) = module else {
            return vec![StatusCode::NoSchedule];
        };

        match &module.category {
            Category::PaidLeave | Category::UnpaidLeave | Category::Off => {
                if facts.has_any_punch() {
                    return vec![StatusCode::Error];
                }
                let code = match module.category {
                    Category::PaidLeave => StatusCode::Pay,
                    Category::UnpaidLeave => StatusCode::NoPay,
                    _ => StatusCode::Off,
                };
                vec![code]
            }
            Category::RegularWork | Category::HolidayWork => {
                let is_holiday = module.category == Category::HolidayWork;

                if facts.position == DayPosition::Future {
                    return if is_holiday {
                        vec![StatusCode::Holiday]
                    } else {
                        Vec::new()
                    };
                }

                let is_error = match facts.position {
                    DayPosition::Today => {
                        facts.stay_misses_paid_time() || self.start_passed_without_punches(day, module, facts, now)
                    }
                    _ => !facts.has_any_punch() || facts.stay_misses_paid_time(),
                };
                if is_error {
                    return vec![StatusCode::Error];
                }

                // Holiday work is shown on its own; modifiers stay in the durations only
                if is_holiday {
                    return vec![StatusCode::Holiday];
                }

                let mut codes = Vec::with_capacity(3);
                if facts.late > 0 {
                    codes.push(StatusCode::Late);
                }
                if facts.early > 0 {
                    codes.push(StatusCode::Early);
                }
                if facts.overtime > 0 {
                    codes.push(StatusCode::Overtime);
                }
                if codes.is_empty() && facts.checkin.is_some() {
                    codes.insert(0, StatusCode::Normal);
                }
                codes
            }
            Category::Unrecognized(_) => vec![StatusCode::NoSchedule],
        }
    }

    fn start_passed_without_punches(
        &self,
        day: NaiveDate,
        module: &ScheduleModule,
        facts: &DayFacts,
        now: NaiveDateTime,
    ) -> bool {
        if !self.config.policy().flag_missing_punches_after_start_today || facts.has_any_punch() {
            return false;
        }
        module
            .start_time
            .is_some_and(|start| now >= day.and_time(start))
    }
}

/// Classifies one day with the default labels and policy.
///
/// See [`Classifier::classify_day`].
pub fn classify_day(
    day: NaiveDate,
    module: Option<&ScheduleModule>,
    log: &DayLog,
    now: NaiveDateTime,
) -> Metrics {
    DEFAULT_CLASSIFIER.classify_day(day, module, log, now)
}
