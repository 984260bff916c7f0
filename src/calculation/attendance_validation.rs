//! Attendance verification.
//!
//! This module classifies a single check-in or check-out attempt from the
//! requesting network and the device's trust state. The verdict is stored by
//! the caller; re-running the function after an administrator approves a
//! device recomputes it.

use crate::error::EngineResult;
use crate::models::{AttendanceStatus, ValidationInput, ValidationResult};

use super::ip_address::ip_to_int;

/// Classifies an attendance attempt as in-office or remote, and flags it for
/// review when the device is not approved.
///
/// Rules, first match wins:
///
/// | network     | device              | status      | suspicious | add to unverified |
/// |-------------|---------------------|-------------|------------|-------------------|
/// | trusted     | approved            | `IN_OFFICE` | no         | no                |
/// | trusted     | unknown             | `IN_OFFICE` | yes        | yes               |
/// | trusted     | pending review      | `IN_OFFICE` | yes        | no                |
/// | not trusted | approved            | `REMOTE`    | no         | no                |
/// | not trusted | unknown             | `REMOTE`    | yes        | yes               |
/// | not trusted | pending review      | `REMOTE`    | yes        | no                |
///
/// A network is trusted when the address falls inside any whitelisted range;
/// an empty whitelist trusts nothing. Device ids are compared exactly.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidIpAddress`] if `input.ip` is
/// not a valid IPv4 address.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::validate_attendance;
/// use attendance_engine::models::{AttendanceStatus, IpRange, ValidationInput};
///
/// let input = ValidationInput {
///     ip: "192.168.1.5".to_string(),
///     device_id: "new-laptop".to_string(),
///     approved_device_ids: Default::default(),
///     unverified_device_ids: Default::default(),
///     whitelisted_ip_ranges: vec![IpRange::from_addresses("192.168.1.0", "192.168.1.255").unwrap()],
/// };
///
/// let verdict = validate_attendance(&input).unwrap();
/// assert_eq!(verdict.status, AttendanceStatus::InOffice);
/// assert!(verdict.suspicious);
/// assert!(verdict.should_add_to_unverified);
/// ```
pub fn validate_attendance(input: &ValidationInput) -> EngineResult<ValidationResult> {
    let ip = ip_to_int(&input.ip)?;

    let ip_trusted = input
        .whitelisted_ip_ranges
        .iter()
        .any(|range| range.contains(ip));
    let device_approved = input.approved_device_ids.contains(&input.device_id);
    let device_unverified = input.unverified_device_ids.contains(&input.device_id);

    let status = if ip_trusted {
        AttendanceStatus::InOffice
    } else {
        AttendanceStatus::Remote
    };

    Ok(ValidationResult {
        status,
        suspicious: !device_approved,
        should_add_to_unverified: !device_approved && !device_unverified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::IpRange;
    use std::collections::HashSet;

    const DEVICE: &str = "fp-3f9a";

    fn office_range() -> IpRange {
        IpRange::from_addresses("192.168.1.0", "192.168.1.255").unwrap()
    }

    fn input(ip: &str, approved: &[&str], unverified: &[&str]) -> ValidationInput {
        ValidationInput {
            ip: ip.to_string(),
            device_id: DEVICE.to_string(),
            approved_device_ids: approved.iter().map(|s| s.to_string()).collect(),
            unverified_device_ids: unverified.iter().map(|s| s.to_string()).collect(),
            whitelisted_ip_ranges: vec![office_range()],
        }
    }

    fn verdict(status: AttendanceStatus, suspicious: bool, add: bool) -> ValidationResult {
        ValidationResult {
            status,
            suspicious,
            should_add_to_unverified: add,
        }
    }

    // ==========================================================================
    // AV-001..AV-006: decision table
    // ==========================================================================
    #[test]
    fn test_av_001_trusted_network_approved_device() {
        let result = validate_attendance(&input("192.168.1.5", &[DEVICE], &[])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::InOffice, false, false));
    }

    #[test]
    fn test_av_002_trusted_network_unknown_device() {
        let result = validate_attendance(&input("192.168.1.5", &[], &[])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::InOffice, true, true));
    }

    #[test]
    fn test_av_003_trusted_network_pending_device() {
        let result = validate_attendance(&input("192.168.1.5", &[], &[DEVICE])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::InOffice, true, false));
    }

    #[test]
    fn test_av_004_untrusted_network_approved_device() {
        let result = validate_attendance(&input("203.0.113.9", &[DEVICE], &[])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::Remote, false, false));
    }

    #[test]
    fn test_av_005_untrusted_network_unknown_device() {
        let result = validate_attendance(&input("203.0.113.9", &[], &[])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::Remote, true, true));
    }

    #[test]
    fn test_av_006_untrusted_network_pending_device() {
        let result = validate_attendance(&input("203.0.113.9", &[], &[DEVICE])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::Remote, true, false));
    }

    // ==========================================================================
    // Range boundaries
    // ==========================================================================
    #[test]
    fn test_range_bounds_are_inclusive() {
        let min = ip_to_int("192.168.1.0").unwrap();
        let max = ip_to_int("192.168.1.255").unwrap();
        assert_eq!(office_range(), IpRange::new(min, max));

        for ip in ["192.168.1.0", "192.168.1.255"] {
            let result = validate_attendance(&input(ip, &[DEVICE], &[])).unwrap();
            assert_eq!(result.status, AttendanceStatus::InOffice, "{} should be trusted", ip);
        }
        for ip in ["192.168.0.255", "192.168.2.0"] {
            let result = validate_attendance(&input(ip, &[DEVICE], &[])).unwrap();
            assert_eq!(result.status, AttendanceStatus::Remote, "{} should not be trusted", ip);
        }
    }

    #[test]
    fn test_any_matching_range_trusts() {
        let mut request = input("10.20.0.7", &[DEVICE], &[]);
        request
            .whitelisted_ip_ranges
            .push(IpRange::from_addresses("10.20.0.0", "10.20.255.255").unwrap());

        let result = validate_attendance(&request).unwrap();
        assert_eq!(result.status, AttendanceStatus::InOffice);
    }

    #[test]
    fn test_empty_whitelist_trusts_nothing() {
        let mut request = input("192.168.1.5", &[DEVICE], &[]);
        request.whitelisted_ip_ranges.clear();

        let result = validate_attendance(&request).unwrap();
        assert_eq!(result.status, AttendanceStatus::Remote);
        assert!(!result.suspicious);
    }

    #[test]
    fn test_inverted_range_never_trusts() {
        let mut request = input("192.168.1.5", &[DEVICE], &[]);
        request.whitelisted_ip_ranges = vec![IpRange::new(
            ip_to_int("192.168.1.255").unwrap(),
            ip_to_int("192.168.1.0").unwrap(),
        )];

        let result = validate_attendance(&request).unwrap();
        assert_eq!(result.status, AttendanceStatus::Remote);
    }

    // ==========================================================================
    // Device matching and malformed input
    // ==========================================================================
    #[test]
    fn test_device_match_is_case_sensitive() {
        let result = validate_attendance(&input("192.168.1.5", &["FP-3F9A"], &[])).unwrap();
        assert!(result.suspicious);
        assert!(result.should_add_to_unverified);
    }

    #[test]
    fn test_approved_wins_over_stale_unverified_entry() {
        let result = validate_attendance(&input("192.168.1.5", &[DEVICE], &[DEVICE])).unwrap();
        assert_eq!(result, verdict(AttendanceStatus::InOffice, false, false));
    }

    #[test]
    fn test_malformed_ip_fails_loudly() {
        let mut request = input("not-an-ip", &[DEVICE], &[]);
        request.whitelisted_ip_ranges = vec![IpRange::new(0, u32::MAX)];

        assert!(matches!(
            validate_attendance(&request),
            Err(EngineError::InvalidIpAddress { .. })
        ));
    }

    // ==========================================================================
    // Re-validation after approval
    // ==========================================================================
    #[test]
    fn test_approval_clears_suspicion() {
        let mut request = input("192.168.1.5", &[], &[DEVICE]);
        let before = validate_attendance(&request).unwrap();
        assert!(before.suspicious);

        request.approve_device();
        let after = validate_attendance(&request).unwrap();
        assert_eq!(after, verdict(AttendanceStatus::InOffice, false, false));
    }

    #[test]
    fn test_approval_is_idempotent_for_approved_device() {
        let mut request = input("192.168.1.5", &[DEVICE], &[]);
        let before = validate_attendance(&request).unwrap();

        request.approve_device();
        request.approve_device();
        let after = validate_attendance(&request).unwrap();

        assert_eq!(before, after);
        assert!(!after.suspicious);
        assert_eq!(request.approved_device_ids, HashSet::from([DEVICE.to_string()]));
    }
}
