//! Leave-trend prediction.
//!
//! Next month's leave is extrapolated from recent monthly totals with an
//! ordinary least-squares line over `x = 0..n`, evaluated one month ahead.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{LeavePrediction, LeaveRecord};

use super::business_calendar::previous_month_windows;
use super::overflow;

/// Number of past months used for the default prediction.
pub const TREND_MONTHS: usize = 3;

/// Predicts next month's leave days from the last three monthly totals.
///
/// `past_three_months` is ordered oldest first. The prediction is clamped
/// at zero and `trend_increasing` is true only for a strictly positive slope.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the regression overflows.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::predict_next_month_leaves;
/// use rust_decimal::Decimal;
///
/// let rising =
///     predict_next_month_leaves(&[Decimal::from(2), Decimal::from(4), Decimal::from(6)]).unwrap();
/// assert_eq!(rising.predicted, Decimal::from(8));
/// assert!(rising.trend_increasing);
///
/// let flat =
///     predict_next_month_leaves(&[Decimal::from(5), Decimal::from(5), Decimal::from(5)]).unwrap();
/// assert_eq!(flat.predicted, Decimal::from(5));
/// assert!(!flat.trend_increasing);
/// ```
pub fn predict_next_month_leaves(
    past_three_months: &[Decimal; TREND_MONTHS],
) -> EngineResult<LeavePrediction> {
    predict_from_history(past_three_months)
}

/// Predicts next month's leave days from any number of monthly totals.
///
/// With fewer than three points no line is fitted: the prediction is the
/// mean of the points (zero for an empty history) and the trend is flat.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the mean or the fitted line overflows.
pub fn predict_from_history(history: &[Decimal]) -> EngineResult<LeavePrediction> {
    if history.len() < TREND_MONTHS {
        let predicted = mean(history)?.max(Decimal::ZERO);
        return Ok(LeavePrediction {
            predicted,
            trend_increasing: false,
            slope: Decimal::ZERO,
        });
    }

    let n = Decimal::from(history.len() as u64);
    let x_mean = (n - Decimal::ONE) / Decimal::TWO;
    let y_mean = mean(history)?;

    let (covariance, variance) = history
        .iter()
        .enumerate()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(cov, var), (x, y)| {
            let dx = Decimal::from(x as u64) - x_mean;
            let term = y.checked_sub(y_mean)?.checked_mul(dx)?;
            Some((cov.checked_add(term)?, var + dx * dx))
        })
        .ok_or_else(|| overflow("leave covariance"))?;

    let slope = covariance
        .checked_div(variance)
        .ok_or_else(|| overflow("leave trend slope"))?;
    let predicted = slope
        .checked_mul(n - x_mean)
        .and_then(|step| y_mean.checked_add(step))
        .ok_or_else(|| overflow("leave prediction"))?
        .max(Decimal::ZERO);

    Ok(LeavePrediction {
        predicted,
        trend_increasing: slope > Decimal::ZERO,
        slope,
    })
}

/// Sums approved leave for each of the three months before `reference`.
///
/// Leave is attributed to the month of its start date. The result is oldest
/// first, ready for [`predict_next_month_leaves`].
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if a monthly total overflows.
pub fn monthly_leave_totals(
    records: &[LeaveRecord],
    reference: NaiveDate,
) -> EngineResult<[Decimal; TREND_MONTHS]> {
    let mut totals = [Decimal::ZERO; TREND_MONTHS];
    let windows = previous_month_windows(reference, TREND_MONTHS as u32);

    for (total, window) in totals.iter_mut().zip(windows.iter()) {
        *total = records
            .iter()
            .filter(|r| r.is_approved() && window.contains(r.start_date))
            .try_fold(Decimal::ZERO, |sum, r| sum.checked_add(r.duration))
            .ok_or_else(|| overflow("monthly leave total"))?;
    }

    Ok(totals)
}

fn mean(values: &[Decimal]) -> EngineResult<Decimal> {
    if values.is_empty() {
        return Ok(Decimal::ZERO);
    }
    values
        .iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
        .and_then(|sum| sum.checked_div(Decimal::from(values.len() as u64)))
        .ok_or_else(|| overflow("leave mean"))
}
