//! Business calendar utilities.
//!
//! All day boundaries in the engine are UTC calendar days. Payroll,
//! performance scoring and leave prediction derive day keys, business-day
//! counts and month windows from this module only, so they always agree on
//! which day an instant belongs to.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Returns the UTC calendar day of an instant.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::day_key;
/// use chrono::{DateTime, NaiveDate, Utc};
///
/// // 23:30 in New York on the 15th is already the 16th in UTC
/// let ts = DateTime::parse_from_rfc3339("2026-01-15T23:30:00-05:00").unwrap().with_timezone(&Utc);
/// assert_eq!(day_key(ts), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// ```
pub fn day_key(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Returns true for Monday through Friday. No holiday calendar is applied.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts Monday-to-Friday days in `start..=end`.
///
/// Returns 0 when `start` is after `end`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::count_business_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(count_business_days(start, end), 22);
/// ```
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_business_day(*day))
        .count() as u32
}

/// A calendar month as an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthWindow {
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month.
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Returns true if `date` falls within the month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Returns the calendar month containing `date`.
pub fn month_window(date: NaiveDate) -> MonthWindow {
    let start = date - Days::new(u64::from(date.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    MonthWindow { start, end }
}

/// Returns the `count` months before the month of `reference`, oldest first.
///
/// The reference month itself is not included.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::previous_month_windows;
/// use chrono::NaiveDate;
///
/// let windows = previous_month_windows(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(), 3);
/// let starts: Vec<String> = windows.iter().map(|w| w.start.to_string()).collect();
/// assert_eq!(starts, vec!["2025-12-01", "2026-01-01", "2026-02-01"]);
/// ```
pub fn previous_month_windows(reference: NaiveDate, count: u32) -> Vec<MonthWindow> {
    let current = month_window(reference).start;
    (1..=count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(month_window)
        .collect()
}
