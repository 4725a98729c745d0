//! Calculation logic for the Attendance Engine.
//!
//! This module contains the half-open segment algebra, the paid-segment
//! builder that removes rest windows from a scheduled work span, the daily
//! classifier that derives late, early-leave, overtime and holiday-work
//! durations and status codes, and the monthly builder and summaries.

mod classifier;
mod monthly;
mod paid_segments;
mod segments;

pub use classifier::{Classifier, DayPosition, classify_day, compute_holiday, compute_overtime};
pub use monthly::{
    DailyAttendance, EmployeeMonth, MonthlySummary, build_monthly_attendance, resolve_day_log,
    summarize_employees,
};
pub use paid_segments::{build_paid_segments, paid_seconds};
pub use segments::{
    Segment, duration_after, duration_before, intersection_duration, latest_end, subtract,
    total_duration,
};
