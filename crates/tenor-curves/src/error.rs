//! Error types for curve construction and bootstrapping.

use tenor_core::types::Date;
use tenor_core::CoreError;
use tenor_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Node data that cannot define a curve.
    #[error("Invalid curve definition: {reason}")]
    InvalidCurveDefinition {
        /// Description of the problem.
        reason: String,
    },

    /// Market quotes that imply an impossible curve.
    #[error("Invalid market data: {reason}")]
    InvalidMarketData {
        /// Description of the problem.
        reason: String,
    },

    /// A bootstrap node could not be solved.
    #[error("Calibration did not converge for instrument {index} maturing {maturity}: {reason}")]
    CalibrationNonConvergence {
        /// Position of the instrument in maturity order.
        index: usize,
        /// Maturity date of the instrument.
        maturity: Date,
        /// Root finder diagnostics.
        reason: String,
    },

    /// Root finder failure outside a bootstrap.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Date or convention failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates an invalid curve definition error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurveDefinition {
            reason: reason.into(),
        }
    }

    /// Creates an invalid market data error.
    #[must_use]
    pub fn invalid_market_data(reason: impl Into<String>) -> Self {
        Self::InvalidMarketData {
            reason: reason.into(),
        }
    }

    /// Creates a non-convergence error for the instrument at `index`.
    #[must_use]
    pub fn non_convergence(index: usize, maturity: Date, reason: impl Into<String>) -> Self {
        Self::CalibrationNonConvergence {
            index,
            maturity,
            reason: reason.into(),
        }
    }
}
