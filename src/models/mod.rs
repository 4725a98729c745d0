//! Core data models for the Attendance Engine.
//!
//! This module contains the schedule, punch-log, and result types used
//! throughout the engine, plus the time-of-day parsing helpers.

mod day_log;
mod metrics;
mod month;
mod schedule;
pub mod time_of_day;

pub use day_log::{DayLog, Punch, PunchKind};
pub use metrics::{Metrics, MinuteMetrics, StatusCode};
pub use month::MonthSchedule;
pub use schedule::{Category, RestWindow, ScheduleModule};
