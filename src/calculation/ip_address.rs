//! IPv4 address conversion.
//!
//! Whitelisted office networks are stored as numeric ranges, so every
//! requesting address is converted to its 32-bit form before comparison.

use std::net::Ipv4Addr;

use crate::error::{EngineError, EngineResult};

/// Prefix used by dual-stack listeners for IPv4 clients.
const IPV4_MAPPED_PREFIX: &str = "::ffff:";

/// Converts a dotted-quad IPv4 address into its 32-bit integer form.
///
/// The result is `(a << 24) | (b << 16) | (c << 8) | d`. IPv4-mapped IPv6
/// notation (`::ffff:10.0.0.1`) is accepted and mapped to the embedded
/// address. Anything else that is not a strict dotted quad is rejected
/// rather than defaulted, because a silent `0.0.0.0` would match any range
/// starting at zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIpAddress`] for malformed addresses.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::ip_to_int;
///
/// assert_eq!(ip_to_int("192.168.1.5").unwrap(), 3_232_235_781);
/// assert_eq!(ip_to_int("::ffff:10.0.0.1").unwrap(), 167_772_161);
/// assert!(ip_to_int("192.168.1").is_err());
/// assert!(ip_to_int("").is_err());
/// ```
pub fn ip_to_int(ip: &str) -> EngineResult<u32> {
    let candidate = strip_ipv4_mapped_prefix(ip);

    candidate
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|e| EngineError::InvalidIpAddress {
            ip: ip.to_string(),
            message: e.to_string(),
        })
}

fn strip_ipv4_mapped_prefix(ip: &str) -> &str {
    match ip.get(..IPV4_MAPPED_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(IPV4_MAPPED_PREFIX) => {
            &ip[IPV4_MAPPED_PREFIX.len()..]
        }
        _ => ip,
    }
}
