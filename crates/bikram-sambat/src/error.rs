//! Error types for bikram-sambat operations.

use chronology_core::ChronologyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid leap-year table: {0}")]
    InvalidRuleTable(#[from] serde_json::Error),

    #[error(transparent)]
    Chronology(#[from] ChronologyError),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message() {
        let e = CalendarError::InvalidArgument("Invalid min days in first week: 0".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid argument: Invalid min days in first week: 0"
        );
    }

    #[test]
    fn chronology_errors_pass_through() {
        let e: CalendarError = ChronologyError::UnsupportedZero { field: "year" }.into();
        assert_eq!(e.to_string(), "Value 0 for year is not supported");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
