//! Attendance Time-Segment Calculation Engine
//!
//! This crate converts a work schedule module plus a day's raw check-in/check-out
//! times into a classified daily attendance outcome: late, early-leave, overtime and
//! holiday-work seconds, and an ordered list of status codes.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
