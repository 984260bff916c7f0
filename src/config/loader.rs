//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::{PayrollRules, PerformanceWeights, PunctualityPolicy};
use crate::error::{EngineError, EngineResult};

use super::types::{
    CalendarConfig, EngineConfig, EngineMetadata, PayrollConfig, PerformanceConfig,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and exposes them as the rule types the calculations take.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml       # Engine name and version
/// ├── payroll.yaml      # Overtime threshold and multiplier
/// ├── performance.yaml  # Score weights
/// └── calendar.yaml     # Work start time and grace period
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let rules = loader.payroll_rules();
/// println!("Overtime after {} hours", rules.overtime_threshold_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A threshold, multiplier or weight is negative
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let payroll_path = path.join("payroll.yaml");
        let payroll = Self::load_yaml::<PayrollConfig>(&payroll_path)?;
        Self::require_non_negative(
            &payroll_path,
            &[
                ("overtime.threshold_hours", payroll.overtime.threshold_hours),
                ("overtime.multiplier", payroll.overtime.multiplier),
            ],
        )?;

        let performance_path = path.join("performance.yaml");
        let performance = Self::load_yaml::<PerformanceConfig>(&performance_path)?;
        Self::require_non_negative(
            &performance_path,
            &[
                ("weights.attendance", performance.weights.attendance),
                ("weights.punctuality", performance.weights.punctuality),
                ("weights.leave_penalty", performance.weights.leave_penalty),
            ],
        )?;

        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;

        let config = EngineConfig::new(metadata, payroll, performance, calendar);

        Ok(Self { config })
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

    fn require_non_negative(path: &Path, values: &[(&str, Decimal)]) -> EngineResult<()> {
        match values.iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((key, value)) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("{} must not be negative, got {}", key, value),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Returns the configured payroll rules.
    pub fn payroll_rules(&self) -> PayrollRules {
        self.config.payroll().rules()
    }

    /// Returns the configured performance weights.
    pub fn performance_weights(&self) -> PerformanceWeights {
        self.config.performance().weights()
    }

    /// Returns the configured punctuality policy.
    pub fn punctuality_policy(&self) -> PunctualityPolicy {
        self.config.calendar().punctuality()
    }
}
