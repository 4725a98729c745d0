//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading classifier
//! configuration and month schedules from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Category, MonthSchedule};

use super::types::{ClassifierPolicy, EngineConfig, MonthScheduleFile, StatusLabels};

/// Loads and provides access to classifier configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── labels.yaml   # Status code → display label
/// └── policy.yaml   # Classifier policy switches
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let classifier = loader.classifier();
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let labels = Self::load_yaml::<StatusLabels>(&path.join("labels.yaml"))?;
        let unknown = labels.unknown_codes();
        if !unknown.is_empty() {
            warn!(codes = ?unknown, "Label table contains unknown status codes");
        }

        let policy = Self::load_yaml::<ClassifierPolicy>(&path.join("policy.yaml"))?;

        info!(
            path = %path.display(),
            flag_missing_punches_after_start_today = policy.flag_missing_punches_after_start_today,
            infer_checkout_from_schedule_end = policy.infer_checkout_from_schedule_end,
            "Loaded classifier configuration"
        );

        Ok(Self {
            config: EngineConfig::new(labels, policy),
        })
    }

    /// Loads a month schedule file.
    ///
    /// Times are parsed strictly; a malformed time fails with a parse error.
    /// Day assignments that name an unknown module or fall outside the month
    /// fail with [`EngineError::InvalidSchedule`].
    pub fn load_month_schedule<P: AsRef<Path>>(path: P) -> EngineResult<MonthSchedule> {
        let file = Self::load_yaml::<MonthScheduleFile>(path.as_ref())?;
        Self::build_month_schedule(file)
    }

    /// Converts a parsed month schedule file into a [`MonthSchedule`].
    pub fn build_month_schedule(file: MonthScheduleFile) -> EngineResult<MonthSchedule> {
        let (year, month) = (file.year, file.month);
        let invalid = |message: String| EngineError::InvalidSchedule {
            year,
            month,
            message,
        };

        let mut schedule =
            MonthSchedule::new(year, month).ok_or_else(|| invalid("month is out of range".to_string()))?;

        for (name, module) in &file.modules {
            if let Category::Unrecognized(tag) = &module.category {
                warn!(module = %name, category = %tag, "Module has an unrecognized category");
            }
            if let Some((start, end)) = module.work_span() {
                for (rest_start, rest_end) in module.rest_windows() {
                    if rest_end <= start || rest_start >= end {
                        warn!(module = %name, "Rest window lies outside the work span");
                    }
                }
            }
        }

        for (day, name) in &file.days {
            let mut module = file
                .modules
                .get(name)
                .cloned()
                .ok_or_else(|| invalid(format!("day {} references unknown module '{}'", day, name)))?;
            if module.name.is_empty() {
                module.name = name.clone();
            }
            if !schedule.assign(*day, module) {
                return Err(invalid(format!("day {} is outside the month", day)));
            }
        }

        info!(year, month, days = file.days.len(), "Loaded month schedule");
        Ok(schedule)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds a classifier from this configuration.
    pub fn classifier(&self) -> crate::calculation::Classifier {
        crate::calculation::Classifier::new(self.config.clone())
    }
}
