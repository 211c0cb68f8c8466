//! Error types for chronology operations.

use thiserror::Error;

use crate::Instant;

/// Errors raised while composing, validating, or adjusting instants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChronologyError {
    /// A field value fell outside its supported range.
    #[error("Value {value} for {field} must be in the range [{min},{max}]")]
    IllegalFieldValue {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A skip-zero field was asked to take the value zero.
    #[error("Value 0 for {field} is not supported")]
    UnsupportedZero { field: &'static str },

    /// The instant lies before the chronology's lower limit (inclusive bound).
    #[error("Instant {instant} is below the supported minimum of {limit}")]
    BelowLowerLimit { instant: Instant, limit: Instant },

    /// The instant lies at or after the chronology's upper limit (exclusive bound).
    #[error("Instant {instant} is above the supported maximum of {limit}")]
    AboveUpperLimit { instant: Instant, limit: Instant },

    /// The local wall-clock time falls inside a daylight saving gap.
    #[error("Illegal instant due to time zone offset transition: local {local} in {zone}")]
    SkippedLocalTime { local: Instant, zone: String },

    /// The duration field cannot add amounts (e.g. eras).
    #[error("Unsupported duration field: {0}")]
    UnsupportedDuration(&'static str),

    /// Adding a duration overflowed the instant range.
    #[error("Arithmetic overflow adding {amount} {unit}")]
    Overflow { unit: &'static str, amount: i64 },
}

/// Convenience alias used throughout chronology-core.
pub type Result<T> = std::result::Result<T, ChronologyError>;

/// Check that `value` lies in `[min, max]`, reporting `field` otherwise.
pub fn verify_value_bounds(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(ChronologyError::IllegalFieldValue {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_field_value_message() {
        let e = ChronologyError::IllegalFieldValue {
            field: "monthOfYear",
            value: 14,
            min: 1,
            max: 13,
        };
        assert_eq!(
            e.to_string(),
            "Value 14 for monthOfYear must be in the range [1,13]"
        );
    }

    #[test]
    fn unsupported_zero_message() {
        let e = ChronologyError::UnsupportedZero { field: "year" };
        assert_eq!(e.to_string(), "Value 0 for year is not supported");
    }

    #[test]
    fn verify_value_bounds_is_inclusive() {
        assert!(verify_value_bounds("dayOfMonth", 1, 1, 30).is_ok());
        assert!(verify_value_bounds("dayOfMonth", 30, 1, 30).is_ok());
        assert!(verify_value_bounds("dayOfMonth", 0, 1, 30).is_err());
        assert!(verify_value_bounds("dayOfMonth", 31, 1, 30).is_err());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ChronologyError>();
    }
}
