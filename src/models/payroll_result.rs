//! Payroll result models for the Attendance Engine.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture all outputs from a payroll calculation: the work sessions it was
//! based on, pass-through line items, totals and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WorkSession;

/// A flat allowance or deduction line item.
///
/// Line items carry no structure beyond their amount; the engine sums them
/// and passes them through unchanged for auditability.
///
/// # Example
///
/// ```
/// use attendance_engine::models::LineItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let transport = LineItem {
///     id: "alw_01".to_string(),
///     item_type: "transport".to_string(),
///     amount: Decimal::from_str("120.00").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Caller-assigned identifier.
    pub id: String,
    /// Free-form category (e.g. "transport", "tax", "loan").
    #[serde(rename = "type")]
    pub item_type: String,
    /// The amount, in the same currency as the base salary.
    pub amount: Decimal,
}

/// An allowance added to gross pay.
pub type AllowanceItem = LineItem;

/// A deduction subtracted from gross pay.
pub type DeductionItem = LineItem;

/// Aggregated totals for a payroll calculation.
///
/// None of the monetary fields are rounded; presentation layers round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Hours across all complete sessions.
    pub total_hours: Decimal,
    /// Hours within the per-session threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the per-session threshold.
    pub overtime_hours: Decimal,
    /// Overtime hours paid at the overtime multiplier.
    pub overtime_pay: Decimal,
    /// Sum of all allowance amounts.
    pub allowance_total: Decimal,
    /// Sum of all deduction amounts.
    pub deduction_total: Decimal,
    /// Base salary plus overtime pay plus allowances.
    pub gross_pay: Decimal,
    /// Gross pay minus deductions. May be negative.
    pub net_pay: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate data that did not stop the calculation but that a
/// payroll administrator may want to look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll calculation for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The fixed period salary the calculation started from.
    pub base_salary: Decimal,
    /// The hourly rate used for overtime.
    pub hourly_rate: Decimal,
    /// Work sessions derived from the period's attendance events.
    pub sessions: Vec<WorkSession>,
    /// Allowances, as supplied.
    pub allowances: Vec<AllowanceItem>,
    /// Deductions, as supplied.
    pub deductions: Vec<DeductionItem>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
