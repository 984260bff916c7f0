//! Payroll calculation for a pay period.
//!
//! Base salary is a fixed period amount. Overtime is the only hour-sensitive
//! addition: every complete session contributes its hours beyond the
//! threshold, paid at the overtime multiplier of the hourly rate. Allowances
//! are added and deductions subtracted without further structure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    AllowanceItem, AttendanceEvent, AuditStep, AuditTrace, AuditWarning, DeductionItem, LineItem,
    PayrollResult, PayrollTotals,
};

use super::session_overtime::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_OVERTIME_THRESHOLD_HOURS, detect_session_overtime,
};
use super::overflow;
use super::work_sessions::build_work_session_report;

/// The overtime rules applied by the payroll engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// Hours a session may run before the excess is overtime.
    pub overtime_threshold_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

/// Calculates payroll for a period using the default rules (8 hours, 1.5x).
///
/// # Arguments
///
/// * `attendances` - The period's check-in/check-out events, in any order
/// * `base_salary` - Fixed salary for the period
/// * `hourly_rate` - Rate used to price overtime
/// * `allowances` - Items added to gross pay
/// * `deductions` - Items subtracted from gross pay
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_payroll_for_period;
/// use attendance_engine::models::{AttendanceEvent, LineItem};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let events = vec![
///     AttendanceEvent::check_in(Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap()),
///     AttendanceEvent::check_out(Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()),
/// ];
/// let deductions = vec![LineItem {
///     id: "ded_01".to_string(),
///     item_type: "tax".to_string(),
///     amount: Decimal::from(50),
/// }];
///
/// let result = calculate_payroll_for_period(&events, Decimal::from(1000), Decimal::from(10), &[], &deductions).unwrap();
/// assert_eq!(result.totals.overtime_hours, Decimal::from(2));
/// assert_eq!(result.totals.gross_pay, Decimal::from(1030));
/// assert_eq!(result.totals.net_pay, Decimal::from(980));
/// ```
pub fn calculate_payroll_for_period(
    attendances: &[AttendanceEvent],
    base_salary: Decimal,
    hourly_rate: Decimal,
    allowances: &[AllowanceItem],
    deductions: &[DeductionItem],
) -> EngineResult<PayrollResult> {
    calculate_payroll_with_rules(
        attendances,
        base_salary,
        hourly_rate,
        allowances,
        deductions,
        &PayrollRules::default(),
    )
}

/// Calculates payroll for a period with explicit overtime rules.
///
/// Totals:
///
/// - `regular_hours = max(total_hours - overtime_hours, 0)`
/// - `overtime_pay = multiplier * hourly_rate * overtime_hours`
/// - `gross_pay = base_salary + overtime_pay + allowance_total`
/// - `net_pay = gross_pay - deduction_total` (not clamped)
///
/// Incomplete sessions contribute no hours and are reported as warnings,
/// as are discarded check-outs and a negative net pay.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if a monetary total overflows.
pub fn calculate_payroll_with_rules(
    attendances: &[AttendanceEvent],
    base_salary: Decimal,
    hourly_rate: Decimal,
    allowances: &[AllowanceItem],
    deductions: &[DeductionItem],
    rules: &PayrollRules,
) -> EngineResult<PayrollResult> {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: Pair events into sessions
    let report = build_work_session_report(attendances);
    steps.push(AuditStep {
        step_number,
        rule_id: "work_session_pairing".to_string(),
        rule_name: "Work Session Pairing".to_string(),
        input: serde_json::json!({ "events": attendances.len() }),
        output: serde_json::json!({
            "sessions": report.sessions.len(),
            "incomplete_sessions": report.incomplete_count(),
            "orphaned_check_outs": report.orphaned_check_outs.len()
        }),
        reasoning: format!(
            "Paired {} events into {} sessions",
            attendances.len(),
            report.sessions.len()
        ),
    });
    step_number += 1;

    for session in report.sessions.iter().filter(|s| !s.is_complete()) {
        warnings.push(AuditWarning {
            code: "INCOMPLETE_SESSION".to_string(),
            message: format!(
                "Check-in at {} has no matching check-out and contributes no hours",
                session.check_in.to_rfc3339()
            ),
            severity: "medium".to_string(),
        });
    }
    for timestamp in &report.orphaned_check_outs {
        warnings.push(AuditWarning {
            code: "ORPHANED_CHECK_OUT".to_string(),
            message: format!(
                "Check-out at {} has no open check-in and was ignored",
                timestamp.to_rfc3339()
            ),
            severity: "low".to_string(),
        });
    }

    // Step 2..n: Split each complete session at the threshold
    let mut total_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    for hours in report.sessions.iter().filter_map(|s| s.hours) {
        let detection = detect_session_overtime(hours, rules.overtime_threshold_hours, step_number);
        total_hours += hours;
        overtime_hours += detection.overtime_hours;
        steps.push(detection.audit_step);
        step_number += 1;
    }
    let regular_hours = (total_hours - overtime_hours).max(Decimal::ZERO);

    // Price overtime
    let overtime_pay = rules
        .overtime_multiplier
        .checked_mul(hourly_rate)
        .and_then(|rate| rate.checked_mul(overtime_hours))
        .ok_or_else(|| overflow("overtime pay"))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "multiplier": rules.overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({ "overtime_pay": overtime_pay.normalize().to_string() }),
        reasoning: format!(
            "{} overtime hours x {} x {}",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            rules.overtime_multiplier.normalize()
        ),
    });
    step_number += 1;

    // Sum line items
    let allowance_total = checked_sum(allowances).ok_or_else(|| overflow("allowance total"))?;
    let deduction_total = checked_sum(deductions).ok_or_else(|| overflow("deduction total"))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "line_item_totals".to_string(),
        rule_name: "Allowance and Deduction Totals".to_string(),
        input: serde_json::json!({
            "allowances": allowances.len(),
            "deductions": deductions.len()
        }),
        output: serde_json::json!({
            "allowance_total": allowance_total.normalize().to_string(),
            "deduction_total": deduction_total.normalize().to_string()
        }),
        reasoning: format!(
            "Summed {} allowances and {} deductions",
            allowances.len(),
            deductions.len()
        ),
    });
    step_number += 1;

    // Gross and net
    let gross_pay = base_salary
        .checked_add(overtime_pay)
        .and_then(|pay| pay.checked_add(allowance_total))
        .ok_or_else(|| overflow("gross pay"))?;
    let net_pay = gross_pay
        .checked_sub(deduction_total)
        .ok_or_else(|| overflow("net pay"))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Gross and Net Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "allowance_total": allowance_total.normalize().to_string(),
            "deduction_total": deduction_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "Gross {} = base {} + overtime {} + allowances {}; net {} after {} deductions",
            gross_pay.normalize(),
            base_salary.normalize(),
            overtime_pay.normalize(),
            allowance_total.normalize(),
            net_pay.normalize(),
            deduction_total.normalize()
        ),
    });

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of {} exceed gross pay of {}",
                deduction_total.normalize(),
                gross_pay.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    Ok(PayrollResult {
        base_salary,
        hourly_rate,
        sessions: report.sessions,
        allowances: allowances.to_vec(),
        deductions: deductions.to_vec(),
        totals: PayrollTotals {
            total_hours,
            regular_hours,
            overtime_hours,
            overtime_pay,
            allowance_total,
            deduction_total,
            gross_pay,
            net_pay,
        },
        audit_trace: AuditTrace { steps, warnings },
    })
}

fn checked_sum(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.amount))
}
