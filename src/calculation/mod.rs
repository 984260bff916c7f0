//! Calculation logic for the attendance engine.
//!
//! This module contains the pure functions behind every verdict and summary
//! the engine produces: IP parsing and attendance validation, work-session
//! pairing, per-session overtime detection and payroll, the UTC business
//! calendar, daily attendance summaries, performance scoring, and leave-trend
//! prediction.

mod attendance_summary;
mod attendance_validation;
mod business_calendar;
mod ip_address;
mod leave_trend;
mod payroll;
mod performance_score;
mod session_overtime;
mod work_sessions;

pub use attendance_summary::{PunctualityPolicy, summarize_attendance_days};
pub use attendance_validation::validate_attendance;
pub use business_calendar::{
    MonthWindow, count_business_days, day_key, is_business_day, month_window,
    previous_month_windows,
};
pub use ip_address::ip_to_int;
pub use leave_trend::{
    TREND_MONTHS, monthly_leave_totals, predict_from_history, predict_next_month_leaves,
};
pub use payroll::{PayrollRules, calculate_payroll_for_period, calculate_payroll_with_rules};
pub use performance_score::{
    ATTENDANCE_WEIGHT, LEAVE_PENALTY_WEIGHT, PUNCTUALITY_WEIGHT, PerformanceWeights,
    calculate_performance_score, calculate_performance_score_with_weights, leaves_for_period,
};
pub use session_overtime::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_OVERTIME_THRESHOLD_HOURS, SessionOvertimeDetection,
    detect_session_overtime,
};
pub use work_sessions::{WorkSessionReport, build_work_session_report, build_work_sessions};

use crate::error::EngineError;

/// Error for a `Decimal` result outside the representable range.
pub(crate) fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} exceeds the representable range", what),
    }
}
