//! Attendance event and work session models.
//!
//! This module defines the raw [`AttendanceEvent`] consumed by the engine and
//! the derived [`WorkSession`] produced by pairing check-ins with check-outs.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceType {
    /// Start of a work session.
    CheckIn,
    /// End of a work session.
    CheckOut,
}

/// A single check-in or check-out recorded for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// When the event happened (always UTC).
    pub timestamp: DateTime<Utc>,
    /// Whether this is a check-in or a check-out.
    #[serde(rename = "type")]
    pub event_type: AttendanceType,
}

impl AttendanceEvent {
    /// Creates a check-in event.
    pub fn check_in(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            event_type: AttendanceType::CheckIn,
        }
    }

    /// Creates a check-out event.
    pub fn check_out(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            event_type: AttendanceType::CheckOut,
        }
    }

    /// Parses an event from a raw timestamp string.
    ///
    /// RFC 3339 timestamps are converted to UTC. Timestamps without an offset
    /// (`2026-01-15T09:00:00`) are taken to already be UTC.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimestamp`] if the value matches neither form.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceEvent, AttendanceType};
    ///
    /// let event = AttendanceEvent::parse("2026-01-15T11:00:00+02:00", AttendanceType::CheckIn).unwrap();
    /// assert_eq!(event.timestamp.to_rfc3339(), "2026-01-15T09:00:00+00:00");
    ///
    /// assert!(AttendanceEvent::parse("15/01/2026", AttendanceType::CheckIn).is_err());
    /// ```
    pub fn parse(timestamp: &str, event_type: AttendanceType) -> EngineResult<Self> {
        let timestamp = parse_utc_timestamp(timestamp)?;
        Ok(Self {
            timestamp,
            event_type,
        })
    }
}

/// Parses a timestamp string into a UTC instant.
fn parse_utc_timestamp(value: &str) -> EngineResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| EngineError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// A work session derived from a check-in and its matching check-out.
///
/// An incomplete session (a check-in that was never closed) has no
/// `check_out` and no `hours`, and contributes nothing to hour totals.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkSession;
/// use chrono::{TimeZone, Utc};
///
/// let open = WorkSession {
///     check_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
///     check_out: None,
///     hours: None,
/// };
/// assert!(!open.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// When the session started.
    pub check_in: DateTime<Utc>,
    /// When the session ended, if it was closed.
    pub check_out: Option<DateTime<Utc>>,
    /// Worked hours, if the session was closed.
    pub hours: Option<Decimal>,
}

impl WorkSession {
    /// Returns true if the session has a matching check-out.
    pub fn is_complete(&self) -> bool {
        self.check_out.is_some()
    }
}
