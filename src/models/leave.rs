//! Leave record models.
//!
//! This module defines the leave rows supplied by the caller and the reduced
//! form consumed by the performance scorer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

/// A leave request as stored by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Number of leave days requested (may be fractional, e.g. half days).
    pub duration: Decimal,
    /// The approval state.
    pub status: LeaveStatus,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave; single-day leave when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl LeaveRecord {
    /// Returns true if the leave has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Returns the last day of leave, falling back to the start date.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Returns true if any day of the leave falls within `start..=end`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.last_day() >= start
    }
}

/// A leave entry as seen by the performance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveForPerf {
    /// Number of leave days.
    pub duration: Decimal,
}

impl From<&LeaveRecord> for LeaveForPerf {
    fn from(record: &LeaveRecord) -> Self {
        LeaveForPerf {
            duration: record.duration,
        }
    }
}
