//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the root finders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The iteration cap was hit before the tolerance was met.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final absolute residual.
        residual: f64,
    },

    /// The supplied interval does not bracket a root.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// A derivative vanished during a Newton step.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// No sign change was found while expanding a search interval.
    #[error("No bracket found within [{lower}, {upper}]")]
    BracketNotFound {
        /// Lowest point searched.
        lower: f64,
        /// Highest point searched.
        upper: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a bracket-not-found error.
    #[must_use]
    pub fn bracket_not_found(lower: f64, upper: f64) -> Self {
        Self::BracketNotFound { lower, upper }
    }
}
