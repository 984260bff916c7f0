//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.
//! Every model is a value object built from already-fetched rows for the
//! duration of a single computation.

mod attendance;
mod leave;
mod payroll_result;
mod performance;
mod validation;

pub use attendance::{AttendanceEvent, AttendanceType, WorkSession};
pub use leave::{LeaveForPerf, LeaveRecord, LeaveStatus};
pub use payroll_result::{
    AllowanceItem, AuditStep, AuditTrace, AuditWarning, DeductionItem, LineItem, PayrollResult,
    PayrollTotals,
};
pub use performance::{AttendanceForPerf, LeavePrediction, PerformanceResult};
pub use validation::{AttendanceStatus, IpRange, ValidationInput, ValidationResult};
