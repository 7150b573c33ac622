//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson with Brent's method as a safety net.

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Smallest derivative magnitude accepted for a Newton step.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton iterations attempted before handing over to Brent.
const NEWTON_ITERATIONS: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// 1. Run a short, monitored Newton-Raphson from the initial guess
/// 2. If Newton diverges, stalls on a flat derivative or leaves the finite
///    range, switch to Brent on `bounds`
/// 3. Without bounds, search for a bracket around the initial guess first
///
/// # Example
///
/// ```rust
/// use tenor_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if let Ok(result) = monitored_newton(&f, &df, initial_guess, config) {
        return Ok(result);
    }

    let (a, b) = match bounds {
        Some(bracket) => bracket,
        None => find_bracket(&f, initial_guess).ok_or_else(|| {
            MathError::invalid_input(
                "Newton-Raphson failed and no bracketing interval was found for Brent",
            )
        })?,
    };
    brent(&f, a, b, config)
}

fn monitored_newton<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let max_iter = config.max_iterations.min(NEWTON_ITERATIONS);
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;

    for iteration in 0..max_iter {
        let fx = f(x);
        let residual = fx.abs();
        if residual < config.tolerance {
            return Ok(SolverResult::new(x, iteration, fx));
        }

        if residual > 2.0 * prev_residual {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;
        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult::new(x, iteration + 1, f(x)));
        }
    }

    Err(MathError::convergence_failed(max_iter, f(x).abs()))
}

/// Searches outward from `initial_guess` for an interval with a sign change.
///
/// The half-width starts at 0.1 and doubles each round. Returns `None` once
/// the half-width exceeds 1e6.
pub fn find_bracket<F>(f: &F, initial_guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_centre = f(initial_guess);
    if f_centre == 0.0 {
        return Some((initial_guess, initial_guess));
    }

    let mut width = 0.1;
    while width <= 1e6 {
        let left = initial_guess - width;
        let right = initial_guess + width;
        let f_left = f(left);
        let f_right = f(right);

        if f_left * f_centre <= 0.0 {
            return Some((left, initial_guess));
        }
        if f_right * f_centre <= 0.0 {
            return Some((initial_guess, right));
        }

        width *= 2.0;
    }

    None
}
