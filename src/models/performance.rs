//! Performance scoring and leave prediction models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One calendar day of attendance as seen by the performance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceForPerf {
    /// The UTC calendar day.
    pub date_key: NaiveDate,
    /// Whether the employee checked in on this day.
    pub is_present: bool,
    /// Whether the first check-in of the day was on time.
    pub is_on_time: bool,
}

/// The outcome of scoring an employee over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceResult {
    /// Weighted score clamped to `[0, 1]`.
    pub score: Decimal,
    /// Present days over working days.
    pub attendance_ratio: Decimal,
    /// On-time days over present days.
    pub punctuality_ratio: Decimal,
    /// Leave days over working days. Not capped; may exceed 1.
    pub leave_ratio: Decimal,
    /// Number of days with presence.
    pub present_days: u32,
    /// Number of days with an on-time first check-in.
    pub on_time_days: u32,
    /// Sum of leave durations.
    pub total_leave_days: Decimal,
    /// Business days in the period, as supplied.
    pub working_days: u32,
}

/// A next-month leave forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePrediction {
    /// Predicted leave days for next month, never negative.
    pub predicted: Decimal,
    /// Whether the fitted slope is strictly positive.
    pub trend_increasing: bool,
    /// The fitted slope in leave days per month (zero when no trend was fitted).
    pub slope: Decimal,
}
