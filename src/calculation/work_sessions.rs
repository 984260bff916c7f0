//! Work session pairing.
//!
//! This module turns a period's raw check-in/check-out events into work
//! sessions. Pairing never fails: forgotten check-outs become incomplete
//! sessions and check-outs with nothing to close are discarded.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttendanceEvent, AttendanceType, WorkSession};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Sessions built from a set of events, plus the check-outs that could not
/// be paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSessionReport {
    /// Sessions in check-in order.
    pub sessions: Vec<WorkSession>,
    /// Timestamps of check-outs that had no open check-in.
    pub orphaned_check_outs: Vec<DateTime<Utc>>,
}

impl WorkSessionReport {
    /// Number of sessions that were never closed.
    pub fn incomplete_count(&self) -> usize {
        self.sessions.iter().filter(|s| !s.is_complete()).count()
    }
}

/// Pairs check-ins with check-outs into work sessions.
///
/// Events are sorted by timestamp first, so caller order does not matter.
///
/// - A check-in while another is open closes the earlier one as incomplete.
/// - A check-out with no open check-in is discarded.
/// - A check-out closes the open check-in with
///   `hours = max(0, (check_out - check_in) / 1h)`.
/// - A check-in still open at the end is emitted as incomplete.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::build_work_sessions;
/// use attendance_engine::models::AttendanceEvent;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let events = vec![
///     AttendanceEvent::check_in(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()),
///     AttendanceEvent::check_out(Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap()),
/// ];
///
/// let sessions = build_work_sessions(&events);
/// assert_eq!(sessions.len(), 1);
/// assert_eq!(sessions[0].hours, Some(Decimal::new(85, 1)));
/// ```
pub fn build_work_sessions(events: &[AttendanceEvent]) -> Vec<WorkSession> {
    build_work_session_report(events).sessions
}

/// Pairs events into sessions and reports discarded check-outs.
///
/// Same pairing rules as [`build_work_sessions`].
pub fn build_work_session_report(events: &[AttendanceEvent]) -> WorkSessionReport {
    let mut ordered: Vec<&AttendanceEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.timestamp);

    let mut sessions = Vec::new();
    let mut orphaned_check_outs = Vec::new();
    let mut open_check_in: Option<DateTime<Utc>> = None;

    for event in ordered {
        match event.event_type {
            AttendanceType::CheckIn => {
                if let Some(check_in) = open_check_in.replace(event.timestamp) {
                    sessions.push(incomplete_session(check_in));
                }
            }
            AttendanceType::CheckOut => match open_check_in.take() {
                Some(check_in) => sessions.push(WorkSession {
                    check_in,
                    check_out: Some(event.timestamp),
                    hours: Some(hours_between(check_in, event.timestamp)),
                }),
                None => {
                    debug!(timestamp = %event.timestamp, "Discarding check-out with no open check-in");
                    orphaned_check_outs.push(event.timestamp);
                }
            },
        }
    }

    if let Some(check_in) = open_check_in {
        sessions.push(incomplete_session(check_in));
    }

    WorkSessionReport {
        sessions,
        orphaned_check_outs,
    }
}

fn incomplete_session(check_in: DateTime<Utc>) -> WorkSession {
    WorkSession {
        check_in,
        check_out: None,
        hours: None,
    }
}

/// Hours between two instants, clamped at zero.
fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let millis = (end - start).num_milliseconds().max(0);
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}
