//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{PayrollRules, PerformanceWeights, PunctualityPolicy};

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the engine.
    pub name: String,
    /// The version reported in payroll responses.
    pub version: String,
}

/// Payroll configuration from payroll.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Overtime settings.
    pub overtime: OvertimeSettings,
}

/// Per-session overtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSettings {
    /// Hours a session may run before the excess counts as overtime.
    pub threshold_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub multiplier: Decimal,
}

impl PayrollConfig {
    /// Converts the configuration into payroll rules.
    pub fn rules(&self) -> PayrollRules {
        PayrollRules {
            overtime_threshold_hours: self.overtime.threshold_hours,
            overtime_multiplier: self.overtime.multiplier,
        }
    }
}

/// Performance configuration from performance.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceConfig {
    /// Score weights.
    pub weights: WeightSettings,
}

/// Weights of the three performance ratios.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightSettings {
    /// Weight of the attendance ratio.
    pub attendance: Decimal,
    /// Weight of the punctuality ratio.
    pub punctuality: Decimal,
    /// Weight of the leave ratio, subtracted from the score.
    pub leave_penalty: Decimal,
}

impl PerformanceConfig {
    /// Converts the configuration into performance weights.
    pub fn weights(&self) -> PerformanceWeights {
        PerformanceWeights {
            attendance: self.weights.attendance,
            punctuality: self.weights.punctuality,
            leave_penalty: self.weights.leave_penalty,
        }
    }
}

/// Calendar configuration from calendar.yaml.
///
/// All times are UTC.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Scheduled start of the working day.
    pub work_start: NaiveTime,
    /// Minutes after `work_start` still counted as on time.
    pub grace_minutes: u32,
}

impl CalendarConfig {
    /// Converts the configuration into a punctuality policy.
    pub fn punctuality(&self) -> PunctualityPolicy {
        PunctualityPolicy {
            work_start: self.work_start,
            grace_minutes: self.grace_minutes,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    payroll: PayrollConfig,
    performance: PerformanceConfig,
    calendar: CalendarConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        payroll: PayrollConfig,
        performance: PerformanceConfig,
        calendar: CalendarConfig,
    ) -> Self {
        Self {
            metadata,
            payroll,
            performance,
            calendar,
        }
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the payroll configuration.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the performance configuration.
    pub fn performance(&self) -> &PerformanceConfig {
        &self.performance
    }

    /// Returns the calendar configuration.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }
}
