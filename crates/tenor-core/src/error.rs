//! Error types for date and convention handling.

use thiserror::Error;

use crate::validation::ValidationError;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by date arithmetic and convention lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor string or period that cannot be used.
    #[error("Invalid period '{period}': {reason}")]
    InvalidPeriod {
        /// The offending period text.
        period: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Unknown day count or business day convention name.
    #[error("Unknown convention: {name}")]
    UnknownConvention {
        /// The name that failed to parse.
        name: String,
    },

    /// A configuration field failed validation.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Several configuration fields failed validation.
    #[error("{} validation errors: {}", .0.len(), .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    MultipleValidationErrors(Vec<ValidationError>),
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(period: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            period: period.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(name: impl Into<String>) -> Self {
        Self::UnknownConvention { name: name.into() }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2013-02-30");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::invalid_period("7Q", "unknown unit");
        assert_eq!(err.to_string(), "Invalid period '7Q': unknown unit");
    }
}
