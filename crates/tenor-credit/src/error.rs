//! Error types for CDS pricing, calibration and sensitivities.

use tenor_core::types::Date;
use tenor_core::CoreError;
use tenor_curves::CurveError;
use tenor_math::MathError;
use thiserror::Error;

/// A specialized Result type for credit analytics.
pub type CreditResult<T> = Result<T, CreditError>;

/// Error types for credit analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    /// A CDS that cannot be priced.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of the problem.
        reason: String,
    },

    /// Calibration inputs that do not describe a term structure.
    #[error("Invalid calibration input: {reason}")]
    InvalidCalibrationInput {
        /// Description of the problem.
        reason: String,
    },

    /// Quotes that require a negative hazard rate.
    #[error("Invalid market data: {reason}")]
    InvalidMarketData {
        /// Description of the problem.
        reason: String,
    },

    /// A credit curve node could not be solved.
    #[error("Calibration did not converge for instrument {index} maturing {maturity}: {reason}")]
    CalibrationNonConvergence {
        /// Position of the instrument in the calibration set.
        index: usize,
        /// Maturity date of the instrument.
        maturity: Date,
        /// Root finder diagnostics.
        reason: String,
    },

    /// No pricing function registered for an instrument and model pair.
    #[error("No pricing function for {instrument} under the {model} model")]
    UnsupportedPricing {
        /// Instrument kind.
        instrument: String,
        /// Model kind.
        model: String,
    },

    /// Configuration that cannot be read or parsed.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// Curve construction failure.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Root finder failure.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Date or convention failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CreditError {
    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid calibration input error.
    #[must_use]
    pub fn invalid_calibration_input(reason: impl Into<String>) -> Self {
        Self::InvalidCalibrationInput {
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

    /// Creates an unsupported pricing error.
    #[must_use]
    pub fn unsupported_pricing(instrument: impl Into<String>, model: impl Into<String>) -> Self {
        Self::UnsupportedPricing {
            instrument: instrument.into(),
            model: model.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
