//! Error types for the Attendance Engine.
//!
//! The classifier and the segment algebra are total functions and never fail.
//! Errors only arise when loading configuration or schedule files, or when a
//! time-of-day is parsed strictly.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/labels.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/labels.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time-of-day value was neither a sentinel nor a valid `HH:MM[:SS]` time.
    #[error("Invalid time of day '{value}'")]
    InvalidTimeOfDay {
        /// The rejected input.
        value: String,
    },

    /// A month schedule file was structurally inconsistent.
    #[error("Invalid schedule for {year}-{month:02}: {message}")]
    InvalidSchedule {
        /// The schedule year.
        year: i32,
        /// The schedule month (1-12).
        month: u32,
        /// A description of the inconsistency.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
