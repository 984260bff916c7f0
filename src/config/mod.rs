//! Configuration loading and management for the attendance engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: engine metadata, payroll overtime rules, performance weights and
//! the punctuality calendar.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalendarConfig, EngineConfig, EngineMetadata, OvertimeSettings, PayrollConfig,
    PerformanceConfig, WeightSettings,
};
