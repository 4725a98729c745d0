//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides the status label table, the classifier policy
//! switches, and loaders for YAML configuration and month schedule files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("{:?}", loader.config().policy());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ClassifierPolicy, EngineConfig, MonthScheduleFile, StatusLabels};
