//! CLI error types.

use thiserror::Error;

use tenor_credit::CreditError;
use tenor_curves::CurveError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scenario file is malformed or inconsistent.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// The scenario names no target trades.
    #[error("Scenario has no trades. Add at least one [[trades]] table.")]
    NoTrades,

    /// Yield curve construction failed.
    #[error("Yield curve error: {0}")]
    Curve(#[from] CurveError),

    /// Credit analytics failed.
    #[error("Credit error: {0}")]
    Credit(#[from] CreditError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
