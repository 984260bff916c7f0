//! Per-session overtime detection.
//!
//! This module splits the hours of a single work session into regular and
//! overtime portions. Overtime is measured per session, not per day or week.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Hours a session may run before the excess counts as overtime.
pub const DEFAULT_OVERTIME_THRESHOLD_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Multiplier applied to the hourly rate for overtime hours (1.5).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The regular/overtime split for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOvertimeDetection {
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the threshold (zero if none).
    pub overtime_hours: Decimal,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Splits a session's hours at the overtime threshold.
///
/// # Arguments
///
/// * `worked_hours` - Hours of one complete session
/// * `threshold` - Hours before overtime starts (normally 8)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{detect_session_overtime, DEFAULT_OVERTIME_THRESHOLD_HOURS};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = detect_session_overtime(Decimal::from_str("10").unwrap(), DEFAULT_OVERTIME_THRESHOLD_HOURS, 1);
/// assert_eq!(result.regular_hours, Decimal::from_str("8").unwrap());
/// assert_eq!(result.overtime_hours, Decimal::from_str("2").unwrap());
///
/// let result = detect_session_overtime(Decimal::from_str("7.5").unwrap(), DEFAULT_OVERTIME_THRESHOLD_HOURS, 1);
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// ```
pub fn detect_session_overtime(
    worked_hours: Decimal,
    threshold: Decimal,
    step_number: u32,
) -> SessionOvertimeDetection {
    let regular_hours = worked_hours.min(threshold);
    let overtime_hours = (worked_hours - threshold).max(Decimal::ZERO);

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hour session exceeds {} hour threshold by {} hours",
            worked_hours.normalize(),
            threshold.normalize(),
            overtime_hours.normalize()
        )
    } else {
        format!(
            "{} hour session is within {} hour threshold, no overtime",
            worked_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "session_overtime_detection".to_string(),
        rule_name: "Session Overtime Detection".to_string(),
        input: serde_json::json!({
            "worked_hours": worked_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning,
    };

    SessionOvertimeDetection {
        regular_hours,
        overtime_hours,
        audit_step,
    }
}
