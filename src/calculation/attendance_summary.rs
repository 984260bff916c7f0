//! Daily attendance summary for performance scoring.
//!
//! This module reduces raw attendance events to one record per UTC calendar
//! day, flagging presence and whether the first check-in was on time.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceEvent, AttendanceForPerf, AttendanceType};

use super::business_calendar::day_key;

/// When a check-in counts as on time.
///
/// A day is on time when its earliest check-in (UTC) is no later than
/// `work_start` plus `grace_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctualityPolicy {
    /// Scheduled start of the working day, in UTC.
    pub work_start: NaiveTime,
    /// Minutes after `work_start` still counted as on time.
    pub grace_minutes: u32,
}

impl Default for PunctualityPolicy {
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            grace_minutes: 15,
        }
    }
}

impl PunctualityPolicy {
    /// Returns true if a check-in at `time` is on time.
    ///
    /// The grace period never wraps past midnight.
    pub fn is_on_time(&self, time: NaiveTime) -> bool {
        let deadline =
            self.work_start.num_seconds_from_midnight() as u64 + u64::from(self.grace_minutes) * 60;
        u64::from(time.num_seconds_from_midnight()) <= deadline
    }
}

/// Builds one [`AttendanceForPerf`] per day in `period_start..=period_end`
/// with at least one check-in.
///
/// Days without a check-in produce no record; the scorer measures absence
/// against the number of working days instead. Check-outs are ignored.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{summarize_attendance_days, PunctualityPolicy};
/// use attendance_engine::models::AttendanceEvent;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let events = vec![
///     AttendanceEvent::check_in(Utc.with_ymd_and_hms(2026, 1, 12, 8, 55, 0).unwrap()),
///     AttendanceEvent::check_in(Utc.with_ymd_and_hms(2026, 1, 13, 9, 40, 0).unwrap()),
/// ];
/// let days = summarize_attendance_days(
///     &events,
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     &PunctualityPolicy::default(),
/// );
///
/// assert_eq!(days.len(), 2);
/// assert!(days[0].is_on_time);
/// assert!(!days[1].is_on_time);
/// ```
pub fn summarize_attendance_days(
    events: &[AttendanceEvent],
    period_start: NaiveDate,
    period_end: NaiveDate,
    policy: &PunctualityPolicy,
) -> Vec<AttendanceForPerf> {
    let mut first_check_in: BTreeMap<NaiveDate, NaiveTime> = BTreeMap::new();

    for event in events
        .iter()
        .filter(|e| e.event_type == AttendanceType::CheckIn)
    {
        let date = day_key(event.timestamp);
        if date < period_start || date > period_end {
            continue;
        }
        let time = event.timestamp.time();
        first_check_in
            .entry(date)
            .and_modify(|earliest| *earliest = (*earliest).min(time))
            .or_insert(time);
    }

    first_check_in
        .into_iter()
        .map(|(date_key, time)| AttendanceForPerf {
            date_key,
            is_present: true,
            is_on_time: policy.is_on_time(time),
        })
        .collect()
}
