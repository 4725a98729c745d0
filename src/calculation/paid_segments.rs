//! Paid-segment construction.
//!
//! Turns one schedule module for one date into the ordered list of paid
//! intervals: the work span with the rest windows carved out.

use chrono::NaiveDate;

use crate::models::ScheduleModule;

use super::segments::{Segment, subtract, total_duration};

/// Builds the paid segments of `module` on `day`.
///
/// Returns an empty list when there is no module, the work span is unset, or
/// the span has non-positive length. Spans crossing midnight are not supported
/// and yield no paid time.
///
/// Rest windows with `end > start` are applied in start order, so two
/// overlapping windows remove their union.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{build_paid_segments, total_duration};
/// use attendance_engine::models::{Category, RestWindow, ScheduleModule};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let module = ScheduleModule::new(Category::RegularWork, "office", t(9, 0), t(18, 0))
///     .with_rest(RestWindow::new(t(12, 0), t(13, 0)));
///
/// let day = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
/// let paid = build_paid_segments(day, Some(&module));
/// assert_eq!(paid.len(), 2);
/// assert_eq!(total_duration(&paid), 8 * 3_600);
/// ```
pub fn build_paid_segments(day: NaiveDate, module: Option<&ScheduleModule>) -> Vec<Segment> {
    let Some(module) = module else {
        return Vec::new();
    };
    let Some((start, end)) = module.work_span() else {
        return Vec::new();
    };
    let Some(work) = Segment::new(day.and_time(start), day.and_time(end)) else {
        return Vec::new();
    };

    let mut rests: Vec<Segment> = module
        .rest_windows()
        .filter_map(|(rest_start, rest_end)| {
            Segment::new(day.and_time(rest_start), day.and_time(rest_end))
        })
        .collect();
    rests.sort_by_key(|rest| rest.start);

    rests
        .into_iter()
        .fold(vec![work], |segments, rest| subtract(&segments, rest))
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Total paid seconds of `module` on `day`.
///
/// For callers such as meal-allowance checks that need paid duration without
/// a full status classification.
pub fn paid_seconds(day: NaiveDate, module: Option<&ScheduleModule>) -> i64 {
    total_duration(&build_paid_segments(day, module))
}
