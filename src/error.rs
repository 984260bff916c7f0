//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating attendance and
//! computing payroll or performance figures.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// Only malformed input and configuration problems are errors. Inconsistent
/// but well-formed data (an orphaned check-out, zero working days) is handled
/// by the calculations themselves and never surfaces here.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidIpAddress {
///     ip: "300.1.1.1".to_string(),
///     message: "invalid IPv4 address syntax".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid IP address '300.1.1.1': invalid IPv4 address syntax"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An IP address was not a valid dotted-quad IPv4 address.
    #[error("Invalid IP address '{ip}': {message}")]
    InvalidIpAddress {
        /// The address as supplied by the caller.
        ip: String,
        /// A description of what made the address invalid.
        message: String,
    },

    /// A timestamp could not be parsed.
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw timestamp value.
        value: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request field was well-formed JSON but semantically invalid.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/payroll.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/payroll.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_ip_displays_address_and_message() {
        let error = EngineError::InvalidIpAddress {
            ip: "10.0.0".to_string(),
            message: "invalid IPv4 address syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid IP address '10.0.0': invalid IPv4 address syntax"
        );
    }

    #[test]
    fn test_invalid_timestamp_displays_value_and_message() {
        let error = EngineError::InvalidTimestamp {
            value: "yesterday".to_string(),
            message: "input contains invalid characters".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid timestamp 'yesterday': input contains invalid characters"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "period_end".to_string(),
            message: "must not be before period_start".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'period_end': must not be before period_start"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "decimal overflow".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: decimal overflow");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_ip() -> EngineResult<()> {
            Err(EngineError::InvalidIpAddress {
                ip: "bad".to_string(),
                message: "invalid IPv4 address syntax".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_ip()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
