//! Monthly attendance building and aggregation.
//!
//! Classifies every day of one employee's month against a single `now`, and
//! folds the daily results into per-employee summaries.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ClassifierPolicy;
use crate::models::time_of_day::seconds_to_hours;
use crate::models::{Category, DayLog, Metrics, MonthSchedule, ScheduleModule, StatusCode};

use super::classifier::Classifier;

/// Fills in a missing check-out from the scheduled end.
///
/// Applies only when the policy allows it, the day is strictly before `today`,
/// there is a check-in but no check-out, the module has a work end, and the
/// check-in is not after that end. Otherwise the log is returned unchanged.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::resolve_day_log;
/// use attendance_engine::config::ClassifierPolicy;
/// use attendance_engine::models::{Category, DayLog, ScheduleModule};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let module = ScheduleModule::new(Category::RegularWork, "office", t(9, 0), t(18, 0));
/// let day = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
///
/// let log = resolve_day_log(day, Some(&module), DayLog::new(Some(t(8, 50)), None), today, ClassifierPolicy::default());
/// assert_eq!(log.checkout, Some(t(18, 0)));
/// ```
pub fn resolve_day_log(
    day: NaiveDate,
    module: Option<&ScheduleModule>,
    log: DayLog,
    today: NaiveDate,
    policy: ClassifierPolicy,
) -> DayLog {
    if !policy.infer_checkout_from_schedule_end || log.checkout.is_some() || day >= today {
        return log;
    }

    let scheduled_end = module.and_then(|m| m.end_time);
    match (log.checkin, scheduled_end) {
        (Some(checkin), Some(end)) if checkin <= end => DayLog::new(Some(checkin), Some(end)),
        _ => log,
    }
}

/// One employee's inputs for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonth {
    /// Employee identifier.
    pub employee_id: String,
    /// The month's schedule.
    pub schedule: MonthSchedule,
    /// Reduced punch logs keyed by date; missing dates have no punches.
    #[serde(default)]
    pub logs: BTreeMap<NaiveDate, DayLog>,
    /// Last day of employment; later days are unscheduled and left out of summaries.
    #[serde(default)]
    pub out_date: Option<NaiveDate>,
}

/// The classified attendance of one day in a monthly view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// The calendar day.
    pub day: NaiveDate,
    /// Scheduled category, if any.
    pub category: Option<Category>,
    /// Scheduled module name, if any.
    pub module_name: Option<String>,
    /// Scheduled work start.
    pub work_start: Option<NaiveTime>,
    /// Scheduled work end.
    pub work_end: Option<NaiveTime>,
    /// First check-in.
    pub checkin: Option<NaiveTime>,
    /// Last check-out, possibly taken from the scheduled end.
    pub checkout: Option<NaiveTime>,
    /// True when `checkout` was taken from the scheduled end.
    pub checkout_inferred: bool,
    /// True when the day falls after the employee's last day.
    pub after_out_date: bool,
    /// Classification result.
    pub metrics: Metrics,
}

impl DailyAttendance {
    /// Late arrival recorded.
    pub fn is_late(&self) -> bool {
        self.metrics.late_seconds > 0
    }

    /// Early leave recorded.
    pub fn is_early_checkout(&self) -> bool {
        self.metrics.early_seconds > 0
    }

    /// Overtime recorded.
    pub fn is_overtime(&self) -> bool {
        self.metrics.overtime_seconds > 0
    }
}

/// Classifies every day of an employee's month.
///
/// All days are evaluated against the same `now`.
pub fn build_monthly_attendance(
    employee: &EmployeeMonth,
    now: NaiveDateTime,
    classifier: &Classifier,
) -> Vec<DailyAttendance> {
    let today = now.date();
    let policy = classifier.config().policy();

    let days: Vec<DailyAttendance> = employee
        .schedule
        .dates()
        .map(|day| {
            let after_out_date = employee.out_date.is_some_and(|out| day > out);
            let module = if after_out_date {
                None
            } else {
                employee.schedule.module_for(day)
            };

            let raw = employee.logs.get(&day).copied().unwrap_or_default();
            let log = resolve_day_log(day, module, raw, today, policy);
            let metrics = classifier.classify_day(day, module, &log, now);

            DailyAttendance {
                day,
                category: module.map(|m| m.category.clone()),
                module_name: module.map(|m| m.name.clone()),
                work_start: module.and_then(|m| m.start_time),
                work_end: module.and_then(|m| m.end_time),
                checkin: log.checkin,
                checkout: log.checkout,
                checkout_inferred: log.checkout != raw.checkout,
                after_out_date,
                metrics,
            }
        })
        .collect();

    info!(
        employee_id = %employee.employee_id,
        year = employee.schedule.year(),
        month = employee.schedule.month(),
        days = days.len(),
        "Built monthly attendance"
    );

    days
}

/// Per-employee monthly totals.
///
/// Regular-work and holiday-work days are tallied separately. Days after the
/// employee's last day are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Days classified as `ERROR`.
    pub error_count: u32,
    /// Regular-work days with late arrival.
    pub reg_late_count: u32,
    /// Regular-work late seconds.
    pub reg_late_seconds: i64,
    /// Regular-work days with early leave.
    pub reg_early_count: u32,
    /// Regular-work early-leave seconds.
    pub reg_early_seconds: i64,
    /// Regular-work days with overtime.
    pub reg_overtime_count: u32,
    /// Regular-work overtime seconds.
    pub reg_overtime_seconds: i64,
    /// Holiday-work days with paid time worked.
    pub hol_work_count: u32,
    /// Holiday-work seconds.
    pub hol_work_seconds: i64,
    /// Holiday-work days with late arrival.
    pub hol_late_count: u32,
    /// Holiday-work late seconds.
    pub hol_late_seconds: i64,
    /// Holiday-work days with early leave.
    pub hol_early_count: u32,
    /// Holiday-work early-leave seconds.
    pub hol_early_seconds: i64,
    /// Holiday-work days with overtime.
    pub hol_overtime_count: u32,
    /// Holiday-work overtime seconds.
    pub hol_overtime_seconds: i64,
    /// Unpaid-leave days.
    pub nopay_count: u32,
}

fn tally(count: &mut u32, total: &mut i64, seconds: i64) {
    if seconds > 0 {
        *count += 1;
        *total += seconds;
    }
}

impl MonthlySummary {
    /// Folds a month of daily results.
    pub fn from_days(days: &[DailyAttendance]) -> Self {
        days.iter().fold(Self::default(), |mut summary, day| {
            summary.add_day(day);
            summary
        })
    }

    /// Adds one day's result.
    pub fn add_day(&mut self, day: &DailyAttendance) {
        if day.after_out_date {
            return;
        }

        let metrics = &day.metrics;
        if metrics.has(StatusCode::Error) {
            self.error_count += 1;
        }
        if metrics.has(StatusCode::NoPay) {
            self.nopay_count += 1;
        }

        match day.category {
            Some(Category::RegularWork) => {
                tally(&mut self.reg_late_count, &mut self.reg_late_seconds, metrics.late_seconds);
                tally(&mut self.reg_early_count, &mut self.reg_early_seconds, metrics.early_seconds);
                tally(
                    &mut self.reg_overtime_count,
                    &mut self.reg_overtime_seconds,
                    metrics.overtime_seconds,
                );
            }
            Some(Category::HolidayWork) => {
                tally(&mut self.hol_work_count, &mut self.hol_work_seconds, metrics.holiday_seconds);
                tally(&mut self.hol_late_count, &mut self.hol_late_seconds, metrics.late_seconds);
                tally(&mut self.hol_early_count, &mut self.hol_early_seconds, metrics.early_seconds);
                tally(
                    &mut self.hol_overtime_count,
                    &mut self.hol_overtime_seconds,
                    metrics.overtime_seconds,
                );
            }
            _ => {}
        }
    }

    /// Combines two partial summaries. The operation is commutative.
    pub fn merge(mut self, other: Self) -> Self {
        self.error_count += other.error_count;
        self.reg_late_count += other.reg_late_count;
        self.reg_late_seconds += other.reg_late_seconds;
        self.reg_early_count += other.reg_early_count;
        self.reg_early_seconds += other.reg_early_seconds;
        self.reg_overtime_count += other.reg_overtime_count;
        self.reg_overtime_seconds += other.reg_overtime_seconds;
        self.hol_work_count += other.hol_work_count;
        self.hol_work_seconds += other.hol_work_seconds;
        self.hol_late_count += other.hol_late_count;
        self.hol_late_seconds += other.hol_late_seconds;
        self.hol_early_count += other.hol_early_count;
        self.hol_early_seconds += other.hol_early_seconds;
        self.hol_overtime_count += other.hol_overtime_count;
        self.hol_overtime_seconds += other.hol_overtime_seconds;
        self.nopay_count += other.nopay_count;
        self
    }

    /// Regular plus holiday overtime, in hours.
    pub fn overtime_hours(&self) -> Decimal {
        seconds_to_hours(self.reg_overtime_seconds + self.hol_overtime_seconds)
    }

    /// Holiday-work time, in hours.
    pub fn holiday_work_hours(&self) -> Decimal {
        seconds_to_hours(self.hol_work_seconds)
    }
}

/// Builds and summarizes the month of every employee, keyed by employee id.
///
/// Every employee is evaluated against the same `now`.
pub fn summarize_employees(
    employees: &[EmployeeMonth],
    now: NaiveDateTime,
    classifier: &Classifier,
) -> BTreeMap<String, MonthlySummary> {
    employees
        .iter()
        .map(|employee| {
            let days = build_monthly_attendance(employee, now, classifier);
            (employee.employee_id.clone(), MonthlySummary::from_days(&days))
        })
        .collect()
}
