//! Root-finding algorithms.
//!
//! - [`brent`]: bracketing method mixing bisection, secant and inverse quadratic
//!   steps, the fallback of [`hybrid`]
//! - [`hybrid`]: Newton-Raphson with a Brent fallback, used by the yield curve bootstrap
//! - [`newton_bracketed`]: Newton steps kept inside a shrinking bracket, used by
//!   the credit curve bootstrap where every node must hit machine precision
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Superlinear | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//! | Bracketed Newton | Fast | Guaranteed | Bracket and derivative |
//!
//! *When bounds are provided or can be found automatically.
//!
//! # Example
//!
//! ```rust
//! use tenor_math::solvers::{newton_bracketed, SolverConfig};
//!
//! // Flat hazard rate giving a 5y survival probability of 0.9
//! let f = |h: f64| (-5.0 * h).exp() - 0.9;
//! let df = |h: f64| -5.0 * (-5.0 * h).exp();
//!
//! let result = newton_bracketed(f, df, 0.0, 1.0, 0.02, &SolverConfig::default()).unwrap();
//! assert!((result.root + 0.9f64.ln() / 5.0).abs() < 1e-12);
//! ```

mod bracketed;
mod brent;
mod hybrid;

pub use bracketed::{expand_upper_bracket, newton_bracketed};
pub use brent::brent;
pub use hybrid::{find_bracket, hybrid};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

impl SolverResult {
    pub(crate) fn new(root: f64, iterations: u32, residual: f64) -> Self {
        Self {
            root,
            iterations,
            residual,
        }
    }
}
