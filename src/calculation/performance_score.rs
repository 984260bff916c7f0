//! Performance scoring.
//!
//! The score combines three ratios over a period:
//!
//! ```text
//! score = clamp(0.6 * attendance + 0.4 * punctuality - 0.2 * leave, 0, 1)
//! ```
//!
//! Attendance and punctuality reward, leave usage penalizes. The leave ratio
//! itself is not capped, so heavy leave can push the raw score below zero
//! before clamping.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AttendanceForPerf, LeaveForPerf, LeaveRecord, PerformanceResult};

use super::overflow;

/// Weight of the attendance ratio (0.6).
pub const ATTENDANCE_WEIGHT: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Weight of the punctuality ratio (0.4).
pub const PUNCTUALITY_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Weight of the leave ratio, subtracted from the score (0.2).
pub const LEAVE_PENALTY_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// The weights used to combine the performance ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceWeights {
    /// Weight of the attendance ratio.
    pub attendance: Decimal,
    /// Weight of the punctuality ratio.
    pub punctuality: Decimal,
    /// Weight of the leave ratio (subtracted).
    pub leave_penalty: Decimal,
}

impl Default for PerformanceWeights {
    fn default() -> Self {
        Self {
            attendance: ATTENDANCE_WEIGHT,
            punctuality: PUNCTUALITY_WEIGHT,
            leave_penalty: LEAVE_PENALTY_WEIGHT,
        }
    }
}

/// Scores attendance and leave over a period with the default weights.
///
/// # Arguments
///
/// * `attendance_days` - One record per day the employee was seen
/// * `leaves` - Approved leave overlapping the period
/// * `working_days` - Business days in the period
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the leave total or a weighted ratio overflows.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_performance_score;
/// use attendance_engine::models::{AttendanceForPerf, LeaveForPerf};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let days: Vec<AttendanceForPerf> = (12..=16)
///     .map(|d| AttendanceForPerf {
///         date_key: NaiveDate::from_ymd_opt(2026, 1, d).unwrap(),
///         is_present: true,
///         is_on_time: true,
///     })
///     .collect();
///
/// let result = calculate_performance_score(&days, &[], 5).unwrap();
/// assert_eq!(result.score, Decimal::ONE);
///
/// let leaves = vec![LeaveForPerf { duration: Decimal::from(1) }];
/// let result = calculate_performance_score(&days, &leaves, 5).unwrap();
/// assert_eq!(result.leave_ratio, Decimal::new(2, 1));
/// assert!(result.score < Decimal::ONE);
/// ```
pub fn calculate_performance_score(
    attendance_days: &[AttendanceForPerf],
    leaves: &[LeaveForPerf],
    working_days: u32,
) -> EngineResult<PerformanceResult> {
    calculate_performance_score_with_weights(
        attendance_days,
        leaves,
        working_days,
        &PerformanceWeights::default(),
    )
}

/// Scores attendance and leave over a period with explicit weights.
///
/// Ratios with a zero denominator are zero. The final score is clamped to
/// `[0, 1]`; the ratios are reported unclamped.
///
/// Punctuality is `on_time / present` where a day counts as on time only if
/// it is also present, so an `is_on_time` flag on an absent day is ignored
/// and the ratio never exceeds 1.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the leave total or a weighted ratio overflows.
pub fn calculate_performance_score_with_weights(
    attendance_days: &[AttendanceForPerf],
    leaves: &[LeaveForPerf],
    working_days: u32,
    weights: &PerformanceWeights,
) -> EngineResult<PerformanceResult> {
    let present_days = attendance_days.iter().filter(|d| d.is_present).count() as u32;
    let on_time_days = attendance_days
        .iter()
        .filter(|d| d.is_present && d.is_on_time)
        .count() as u32;
    let total_leave_days = leaves
        .iter()
        .try_fold(Decimal::ZERO, |total, l| total.checked_add(l.duration))
        .ok_or_else(|| overflow("leave total"))?;

    let attendance_ratio = ratio(Decimal::from(present_days), working_days);
    let punctuality_ratio = ratio(Decimal::from(on_time_days), present_days);
    let leave_ratio = ratio(total_leave_days, working_days);

    let weighted = |weight: Decimal, value: Decimal| {
        weight
            .checked_mul(value)
            .ok_or_else(|| overflow("weighted score"))
    };
    let reward = weighted(weights.attendance, attendance_ratio)?
        .checked_add(weighted(weights.punctuality, punctuality_ratio)?)
        .ok_or_else(|| overflow("weighted score"))?;
    let raw = reward
        .checked_sub(weighted(weights.leave_penalty, leave_ratio)?)
        .ok_or_else(|| overflow("weighted score"))?;
    let score = raw.clamp(Decimal::ZERO, Decimal::ONE);

    Ok(PerformanceResult {
        score,
        attendance_ratio,
        punctuality_ratio,
        leave_ratio,
        present_days,
        on_time_days,
        total_leave_days,
        working_days,
    })
}

/// Selects approved leave overlapping `start..=end` for scoring.
///
/// Pending and rejected leave is ignored. Overlapping leave counts its full
/// duration even if it extends past the period.
pub fn leaves_for_period(
    records: &[LeaveRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<LeaveForPerf> {
    records
        .iter()
        .filter(|r| r.is_approved() && r.overlaps(start, end))
        .map(LeaveForPerf::from)
        .collect()
}

// Dividing by a count of at least one never grows the numerator.
fn ratio(numerator: Decimal, denominator: u32) -> Decimal {
    if denominator == 0 {
        Decimal::ZERO
    } else {
        numerator / Decimal::from(denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::LeaveStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn days(present: u32, on_time: u32) -> Vec<AttendanceForPerf> {
        (0..present)
            .map(|i| AttendanceForPerf {
                date_key: make_date("2026-01-01") + chrono::Days::new(u64::from(i)),
                is_present: true,
                is_on_time: i < on_time,
            })
            .collect()
    }

    fn leave(duration: &str) -> LeaveForPerf {
        LeaveForPerf {
            duration: dec(duration),
        }
    }

    #[test]
    fn test_weight_constants() {
        assert_eq!(ATTENDANCE_WEIGHT, dec("0.6"));
        assert_eq!(PUNCTUALITY_WEIGHT, dec("0.4"));
        assert_eq!(LEAVE_PENALTY_WEIGHT, dec("0.2"));
        assert_eq!(ATTENDANCE_WEIGHT + PUNCTUALITY_WEIGHT, Decimal::ONE);
    }

    // ==========================================================================
    // PS-001: perfect attendance, no leave => maximum score
    // ==========================================================================
    #[test]
    fn test_ps_001_perfect_period() {
        let result = calculate_performance_score(&days(20, 20), &[], 20).unwrap();

        assert_eq!(result.attendance_ratio, Decimal::ONE);
        assert_eq!(result.punctuality_ratio, Decimal::ONE);
        assert_eq!(result.leave_ratio, Decimal::ZERO);
        assert_eq!(result.score, Decimal::ONE);
    }

    // ==========================================================================
    // PS-002: no attendance => minimum score
    // ==========================================================================
    #[test]
    fn test_ps_002_no_attendance() {
        let result = calculate_performance_score(&[], &[], 20).unwrap();

        assert_eq!(result.attendance_ratio, Decimal::ZERO);
        assert_eq!(result.punctuality_ratio, Decimal::ZERO);
        assert_eq!(result.score, Decimal::ZERO);
        assert_eq!(result.present_days, 0);
    }

    // ==========================================================================
    // PS-003: mixed period
    // 16/20 present, 12/16 on time, 2 leave days
    // 0.6*0.8 + 0.4*0.75 - 0.2*0.1 = 0.48 + 0.30 - 0.02 = 0.76
    // ==========================================================================
    #[test]
    fn test_ps_003_mixed_period() {
        let result = calculate_performance_score(&days(16, 12), &[leave("2")], 20).unwrap();

        assert_eq!(result.attendance_ratio, dec("0.8"));
        assert_eq!(result.punctuality_ratio, dec("0.75"));
        assert_eq!(result.leave_ratio, dec("0.1"));
        assert_eq!(result.score, dec("0.76"));
        assert_eq!(result.present_days, 16);
        assert_eq!(result.on_time_days, 12);
        assert_eq!(result.total_leave_days, dec("2"));
    }

    #[test]
    fn test_zero_working_days() {
        let result = calculate_performance_score(&days(3, 3), &[leave("1")], 0).unwrap();

        assert_eq!(result.attendance_ratio, Decimal::ZERO);
        assert_eq!(result.leave_ratio, Decimal::ZERO);
        assert_eq!(result.punctuality_ratio, Decimal::ONE);
        assert_eq!(result.score, dec("0.4"));
    }

    #[test]
    fn test_leave_ratio_not_capped() {
        let result = calculate_performance_score(&[], &[leave("15")], 10).unwrap();

        assert_eq!(result.leave_ratio, dec("1.5"));
        assert_eq!(result.score, Decimal::ZERO);
    }

    #[test]
    fn test_score_clamped_above() {
        // Weekend presence can push attendance past 1
        let result = calculate_performance_score(&days(7, 7), &[], 5).unwrap();

        assert_eq!(result.attendance_ratio, dec("1.4"));
        assert_eq!(result.score, Decimal::ONE);
    }

    #[test]
    fn test_absent_on_time_flag_ignored() {
        let attendance = vec![AttendanceForPerf {
            date_key: make_date("2026-01-12"),
            is_present: false,
            is_on_time: true,
        }];
        let result = calculate_performance_score(&attendance, &[], 5).unwrap();

        assert_eq!(result.present_days, 0);
        assert_eq!(result.on_time_days, 0);
        assert_eq!(result.punctuality_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_custom_weights() {
        let weights = PerformanceWeights {
            attendance: dec("0.5"),
            punctuality: dec("0.5"),
            leave_penalty: Decimal::ZERO,
        };
        let result =
            calculate_performance_score_with_weights(&days(10, 5), &[leave("10")], 10, &weights)
                .unwrap();

        assert_eq!(result.score, dec("0.75"));
    }

    #[test]
    fn test_fractional_leave() {
        let result = calculate_performance_score(&days(20, 20), &[leave("0.5")], 20).unwrap();
        assert_eq!(result.leave_ratio, dec("0.025"));
        assert_eq!(result.score, dec("0.995"));
    }

    #[test]
    fn test_leaves_for_period_filters_status_and_overlap() {
        let records = vec![
            LeaveRecord {
                duration: dec("2"),
                status: LeaveStatus::Approved,
                start_date: make_date("2026-01-12"),
                end_date: Some(make_date("2026-01-13")),
            },
            LeaveRecord {
                duration: dec("1"),
                status: LeaveStatus::Pending,
                start_date: make_date("2026-01-14"),
                end_date: None,
            },
            LeaveRecord {
                duration: dec("3"),
                status: LeaveStatus::Approved,
                start_date: make_date("2025-12-30"),
                end_date: Some(make_date("2026-01-01")),
            },
            LeaveRecord {
                duration: dec("1"),
                status: LeaveStatus::Approved,
                start_date: make_date("2026-02-02"),
                end_date: None,
            },
        ];

        let selected = leaves_for_period(&records, make_date("2026-01-01"), make_date("2026-01-31"));
        let durations: Vec<Decimal> = selected.iter().map(|l| l.duration).collect();
        assert_eq!(durations, vec![dec("2"), dec("3")]);
    }

    #[test]
    fn test_overflowing_leave_total_returns_error() {
        let leaves = vec![
            LeaveForPerf {
                duration: Decimal::MAX,
            },
            LeaveForPerf {
                duration: Decimal::MAX,
            },
        ];

        match calculate_performance_score(&[], &leaves, 20) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("leave total"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_weighted_leave_returns_error() {
        let weights = PerformanceWeights {
            leave_penalty: dec("2"),
            ..PerformanceWeights::default()
        };
        let leaves = vec![LeaveForPerf {
            duration: Decimal::MAX,
        }];

        match calculate_performance_score_with_weights(&[], &leaves, 1, &weights) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("weighted score"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_single_leave_is_scored() {
        let leaves = vec![LeaveForPerf {
            duration: Decimal::MAX,
        }];
        let result = calculate_performance_score(&[], &leaves, 1).unwrap();

        assert_eq!(result.leave_ratio, Decimal::MAX);
        assert_eq!(result.score, Decimal::ZERO);
    }
}
