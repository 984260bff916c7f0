//! Attendance validation input and verdict models.
//!
//! This module defines the IP range, device trust input and verdict types
//! used by the attendance validator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calculation::ip_to_int;
use crate::error::EngineResult;

/// An inclusive IPv4 range in numeric form.
///
/// A range whose `min_int` is greater than its `max_int` is not rejected; it
/// simply never matches any address.
///
/// # Example
///
/// ```
/// use attendance_engine::models::IpRange;
///
/// let office = IpRange::from_addresses("192.168.1.0", "192.168.1.255").unwrap();
/// assert_eq!(office.min_int, 3_232_235_776);
/// assert!(office.contains(3_232_235_781)); // 192.168.1.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpRange {
    /// Lowest address in the range.
    pub min_int: u32,
    /// Highest address in the range.
    pub max_int: u32,
}

impl IpRange {
    /// Creates a range from numeric bounds.
    pub fn new(min_int: u32, max_int: u32) -> Self {
        Self { min_int, max_int }
    }

    /// Creates a range from dotted-quad start and end addresses.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidIpAddress`] if either
    /// address is malformed.
    pub fn from_addresses(start: &str, end: &str) -> EngineResult<Self> {
        Ok(Self {
            min_int: ip_to_int(start)?,
            max_int: ip_to_int(end)?,
        })
    }

    /// Returns true if the numeric address lies within the range (inclusive).
    pub fn contains(&self, ip: u32) -> bool {
        self.min_int <= ip && ip <= self.max_int
    }
}

/// Where an attendance event was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Recorded from a whitelisted company network.
    InOffice,
    /// Recorded from outside the company network.
    Remote,
}

/// Everything the validator needs to classify one check-in or check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationInput {
    /// The requesting IP address as a string.
    pub ip: String,
    /// The caller-supplied device identifier (e.g. a browser fingerprint).
    pub device_id: String,
    /// Devices an administrator has approved for this employee.
    #[serde(default)]
    pub approved_device_ids: HashSet<String>,
    /// Devices seen before but still awaiting administrator review.
    #[serde(default)]
    pub unverified_device_ids: HashSet<String>,
    /// The company's trusted network ranges.
    #[serde(default)]
    pub whitelisted_ip_ranges: Vec<IpRange>,
}

impl ValidationInput {
    /// Marks the current device as approved.
    ///
    /// Moves `device_id` out of the unverified set and into the approved set,
    /// as an administrator approval does, so the verdict can be recomputed.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::ValidationInput;
    ///
    /// let mut input = ValidationInput {
    ///     ip: "10.0.0.1".to_string(),
    ///     device_id: "laptop-7".to_string(),
    ///     approved_device_ids: Default::default(),
    ///     unverified_device_ids: ["laptop-7".to_string()].into_iter().collect(),
    ///     whitelisted_ip_ranges: vec![],
    /// };
    /// input.approve_device();
    /// assert!(input.approved_device_ids.contains("laptop-7"));
    /// assert!(input.unverified_device_ids.is_empty());
    /// ```
    pub fn approve_device(&mut self) {
        self.unverified_device_ids.remove(&self.device_id);
        self.approved_device_ids.insert(self.device_id.clone());
    }
}

/// The verdict for one check-in or check-out attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the attempt came from the office network.
    pub status: AttendanceStatus,
    /// Whether the attempt should be flagged for administrator review.
    pub suspicious: bool,
    /// Whether the caller should record the device as unverified.
    pub should_add_to_unverified: bool,
}
