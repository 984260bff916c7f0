//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for every endpoint and
//! their conversion into domain types. Conversion is where malformed
//! addresses, timestamps and amounts are rejected, before any calculation
//! runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceItem, AttendanceEvent, AttendanceType, DeductionItem, IpRange, LeaveRecord,
    ValidationInput,
};

/// Request body for the `/attendance/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateAttendanceRequest {
    /// The requesting IP address.
    pub ip: String,
    /// The requesting device identifier.
    pub device_id: String,
    /// Devices approved for the employee.
    #[serde(default)]
    pub approved_device_ids: Vec<String>,
    /// Devices awaiting review for the employee.
    #[serde(default)]
    pub unverified_device_ids: Vec<String>,
    /// The company's trusted network ranges.
    #[serde(default)]
    pub whitelisted_ip_ranges: Vec<IpRangeRequest>,
}

/// An IP range given as dotted-quad bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpRangeRequest {
    /// First address of the range (inclusive).
    pub start: String,
    /// Last address of the range (inclusive).
    pub end: String,
}

impl TryFrom<ValidateAttendanceRequest> for ValidationInput {
    type Error = EngineError;

    fn try_from(req: ValidateAttendanceRequest) -> EngineResult<Self> {
        let whitelisted_ip_ranges = req
            .whitelisted_ip_ranges
            .iter()
            .map(|range| IpRange::from_addresses(&range.start, &range.end))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(ValidationInput {
            ip: req.ip,
            device_id: req.device_id,
            approved_device_ids: req.approved_device_ids.into_iter().collect(),
            unverified_device_ids: req.unverified_device_ids.into_iter().collect(),
            whitelisted_ip_ranges,
        })
    }
}

/// An attendance event as sent over the wire.
///
/// The timestamp is kept as a string so that unparseable values are reported
/// as `INVALID_TIMESTAMP` rather than a generic JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEventRequest {
    /// ISO-8601 timestamp. Values without an offset are read as UTC.
    pub timestamp: String,
    /// CHECK_IN or CHECK_OUT.
    #[serde(rename = "type")]
    pub event_type: AttendanceType,
}

impl TryFrom<&AttendanceEventRequest> for AttendanceEvent {
    type Error = EngineError;

    fn try_from(req: &AttendanceEventRequest) -> EngineResult<Self> {
        AttendanceEvent::parse(&req.timestamp, req.event_type)
    }
}

/// Parses a list of wire events, failing on the first bad timestamp.
pub(crate) fn parse_events(events: &[AttendanceEventRequest]) -> EngineResult<Vec<AttendanceEvent>> {
    events.iter().map(AttendanceEvent::try_from).collect()
}

/// Request body for the `/attendance/sessions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSessionsRequest {
    /// The events to pair, in any order.
    pub events: Vec<AttendanceEventRequest>,
}

/// Request body for the `/payroll/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee being paid.
    pub employee_id: String,
    /// Fixed salary for the period.
    pub base_salary: Decimal,
    /// Rate used to price overtime.
    pub hourly_rate: Decimal,
    /// The period's attendance events.
    #[serde(default)]
    pub events: Vec<AttendanceEventRequest>,
    /// Items added to gross pay.
    #[serde(default)]
    pub allowances: Vec<AllowanceItem>,
    /// Items subtracted from gross pay.
    #[serde(default)]
    pub deductions: Vec<DeductionItem>,
}

impl PayrollRequest {
    /// Checks amounts that must not be negative.
    ///
    /// Deductions may exceed gross pay; only the inputs themselves are
    /// checked here.
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("base_salary", self.base_salary)?;
        require_non_negative("hourly_rate", self.hourly_rate)?;
        for item in &self.allowances {
            require_non_negative(&format!("allowances.{}", item.id), item.amount)?;
        }
        for item in &self.deductions {
            require_non_negative(&format!("deductions.{}", item.id), item.amount)?;
        }
        Ok(())
    }
}

/// Request body for the `/performance/score` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRequest {
    /// The employee being scored.
    pub employee_id: String,
    /// First day of the scoring period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the scoring period (inclusive).
    pub period_end: NaiveDate,
    /// Attendance events in or around the period.
    #[serde(default)]
    pub events: Vec<AttendanceEventRequest>,
    /// The employee's leave records; only approved overlapping leave counts.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
}

impl PerformanceRequest {
    /// Checks that the period is not inverted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.period_start > self.period_end {
            return Err(EngineError::InvalidInput {
                field: "period_end".to_string(),
                message: format!(
                    "period end {} is before period start {}",
                    self.period_end, self.period_start
                ),
            });
        }
        for leave in &self.leaves {
            require_non_negative("leaves.duration", leave.duration)?;
        }
        Ok(())
    }
}

/// Request body for the `/leaves/predict` endpoint.
///
/// Either `history` (monthly totals, oldest first) or `reference_date` with
/// `leaves` must be supplied. When both are present `history` wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeavePredictionRequest {
    /// Monthly leave totals, oldest first.
    #[serde(default)]
    pub history: Option<Vec<Decimal>>,
    /// Leave records to aggregate into monthly totals.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    /// A day in the month being predicted.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Where a leave prediction gets its monthly totals from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionSource {
    /// Totals supplied directly.
    History(Vec<Decimal>),
    /// Totals derived from leave records for the months before the reference date.
    Records {
        /// The leave records.
        leaves: Vec<LeaveRecord>,
        /// A day in the month being predicted.
        reference_date: NaiveDate,
    },
}

impl TryFrom<LeavePredictionRequest> for PredictionSource {
    type Error = EngineError;

    fn try_from(req: LeavePredictionRequest) -> EngineResult<Self> {
        match (req.history, req.reference_date) {
            (Some(history), _) => {
                for value in &history {
                    require_non_negative("history", *value)?;
                }
                Ok(PredictionSource::History(history))
            }
            (None, Some(reference_date)) => {
                for leave in &req.leaves {
                    require_non_negative("leaves.duration", leave.duration)?;
                }
                Ok(PredictionSource::Records {
                    leaves: req.leaves,
                    reference_date,
                })
            }
            (None, None) => Err(EngineError::InvalidInput {
                field: "history".to_string(),
                message: "either history or reference_date must be provided".to_string(),
            }),
        }
    }
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_request_converts_ranges() {
        let req = ValidateAttendanceRequest {
            ip: "10.0.0.5".to_string(),
            device_id: "fp-1".to_string(),
            approved_device_ids: vec!["fp-1".to_string()],
            unverified_device_ids: vec![],
            whitelisted_ip_ranges: vec![IpRangeRequest {
                start: "10.0.0.0".to_string(),
                end: "10.0.0.255".to_string(),
            }],
        };

        let input = ValidationInput::try_from(req).unwrap();
        assert_eq!(input.whitelisted_ip_ranges, vec![IpRange::new(167_772_160, 167_772_415)]);
        assert!(input.approved_device_ids.contains("fp-1"));
    }

    #[test]
    fn test_validate_request_rejects_bad_range() {
        let req = ValidateAttendanceRequest {
            ip: "10.0.0.5".to_string(),
            device_id: "fp-1".to_string(),
            approved_device_ids: vec![],
            unverified_device_ids: vec![],
            whitelisted_ip_ranges: vec![IpRangeRequest {
                start: "10.0.0".to_string(),
                end: "10.0.0.255".to_string(),
            }],
        };

        match ValidationInput::try_from(req) {
            Err(EngineError::InvalidIpAddress { ip, .. }) => assert_eq!(ip, "10.0.0"),
            other => panic!("Expected InvalidIpAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_event_request_deserializes_wire_format() {
        let json = r#"{"timestamp": "2026-01-15T09:00:00Z", "type": "CHECK_IN"}"#;
        let req: AttendanceEventRequest = serde_json::from_str(json).unwrap();
        let event = AttendanceEvent::try_from(&req).unwrap();
        assert_eq!(event.event_type, AttendanceType::CheckIn);
    }

    #[test]
    fn test_parse_events_stops_on_bad_timestamp() {
        let events = vec![
            AttendanceEventRequest {
                timestamp: "2026-01-15T09:00:00Z".to_string(),
                event_type: AttendanceType::CheckIn,
            },
            AttendanceEventRequest {
                timestamp: "yesterday".to_string(),
                event_type: AttendanceType::CheckOut,
            },
        ];

        assert!(matches!(
            parse_events(&events),
            Err(EngineError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_payroll_request_rejects_negative_rate() {
        let req = PayrollRequest {
            employee_id: "emp_001".to_string(),
            base_salary: dec("1000"),
            hourly_rate: dec("-10"),
            events: vec![],
            allowances: vec![],
            deductions: vec![],
        };

        match req.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_performance_request_rejects_inverted_period() {
        let req = PerformanceRequest {
            employee_id: "emp_001".to_string(),
            period_start: make_date("2026-01-31"),
            period_end: make_date("2026-01-01"),
            events: vec![],
            leaves: vec![],
        };

        assert!(matches!(req.validate(), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_prediction_source_prefers_history() {
        let req = LeavePredictionRequest {
            history: Some(vec![dec("1"), dec("2"), dec("3")]),
            leaves: vec![],
            reference_date: Some(make_date("2026-03-01")),
        };

        assert_eq!(
            PredictionSource::try_from(req).unwrap(),
            PredictionSource::History(vec![dec("1"), dec("2"), dec("3")])
        );
    }

    #[test]
    fn test_prediction_source_requires_input() {
        let req = LeavePredictionRequest {
            history: None,
            leaves: vec![],
            reference_date: None,
        };

        assert!(matches!(
            PredictionSource::try_from(req),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_prediction_source_rejects_negative_leave() {
        let req = LeavePredictionRequest {
            history: None,
            leaves: vec![LeaveRecord {
                duration: dec("-9"),
                status: LeaveStatus::Approved,
                start_date: make_date("2026-02-03"),
                end_date: None,
            }],
            reference_date: Some(make_date("2026-03-15")),
        };

        match PredictionSource::try_from(req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "leaves.duration"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
