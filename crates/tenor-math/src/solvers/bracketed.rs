//! Safeguarded Newton-Raphson on a bracket.
//!
//! Newton steps are taken while they stay inside the current bracket and
//! shrink it fast enough; otherwise the step is replaced by bisection. The
//! bracket is updated with the sign of every new evaluation, so the method
//! cannot leave the interval and converges to full machine precision.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Growth factor of the search interval in [`expand_upper_bracket`].
const EXPANSION_FACTOR: f64 = 1.6;

/// Newton-Raphson restricted to `[lo, hi]`, with `f(lo)·f(hi) ≤ 0`.
///
/// Terminates when the step (Newton or bisection) is below the tolerance, the
/// residual is exactly zero, or the bracket has collapsed. A guess outside
/// the bracket starts from the midpoint.
///
/// ```rust
/// use tenor_math::solvers::{newton_bracketed, SolverConfig};
///
/// let config = SolverConfig::new(1e-15, 100);
/// let result = newton_bracketed(|x| x * x - 2.0, |x| 2.0 * x, 0.0, 2.0, 1.0, &config).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-15);
/// ```
pub fn newton_bracketed<F, DF>(
    f: F,
    df: DF,
    lo: f64,
    hi: f64,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }
    if f_lo == 0.0 {
        return Ok(SolverResult::new(lo, 0, f_lo));
    }
    if f_hi == 0.0 {
        return Ok(SolverResult::new(hi, 0, f_hi));
    }

    // Orient so that f(neg) < 0 < f(pos)
    let (mut neg, mut pos) = if f_lo < 0.0 { (lo, hi) } else { (hi, lo) };

    let inside = initial_guess > lo.min(hi) && initial_guess < lo.max(hi);
    let mut x = if inside { initial_guess } else { 0.5 * (lo + hi) };
    let mut step = (hi - lo).abs();
    let mut prev_step = step;
    let mut fx = f(x);
    let mut dfx = df(x);

    for iteration in 1..=config.max_iterations {
        if fx == 0.0 {
            return Ok(SolverResult::new(x, iteration - 1, fx));
        }

        let leaves_bracket = ((x - pos) * dfx - fx) * ((x - neg) * dfx - fx) > 0.0;
        let too_slow = (2.0 * fx).abs() > (prev_step * dfx).abs();

        prev_step = step;
        if leaves_bracket || too_slow {
            step = 0.5 * (pos - neg);
            x = neg + step;
        } else {
            step = fx / dfx;
            x -= step;
        }

        if step.abs() < config.tolerance || (pos - neg).abs() < config.tolerance {
            let residual = f(x);
            return Ok(SolverResult::new(x, iteration, residual));
        }

        fx = f(x);
        dfx = df(x);
        if fx < 0.0 {
            neg = x;
        } else {
            pos = x;
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

/// Finds `[a, b]` with `a ≥ lower` and a sign change of `f`.
///
/// Starts at `[lower, start]` and moves the upper end outward geometrically.
/// Each failed upper end becomes the new lower end, so the returned bracket is
/// tight. Fails with [`MathError::BracketNotFound`] after `max_expansions`.
pub fn expand_upper_bracket<F>(
    f: &F,
    lower: f64,
    start: f64,
    max_expansions: u32,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if start <= lower {
        return Err(MathError::invalid_input(format!(
            "bracket start {start} must exceed the lower bound {lower}"
        )));
    }

    let f_lower = f(lower);
    if f_lower == 0.0 {
        return Ok((lower, start));
    }

    let mut a = lower;
    let mut b = start;
    let mut width = start - lower;
    for _ in 0..max_expansions {
        let f_b = f(b);
        if f_b * f_lower <= 0.0 {
            return Ok((a, b));
        }
        a = b;
        width *= EXPANSION_FACTOR;
        b = a + width;
    }

    Err(MathError::bracket_not_found(lower, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bracketed_bad_guess() {
        // Newton from 0.01 on atan overshoots; the bracket keeps it honest
        let config = SolverConfig::new(1e-15, 100);
        let f = |x: f64| (x - 3.0).atan();
        let df = |x: f64| 1.0 / (1.0 + (x - 3.0).powi(2));
        let result = newton_bracketed(f, df, -10.0, 50.0, 0.01, &config).unwrap();
        assert_relative_eq!(result.root, 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_bracketed_decreasing_function() {
        let config = SolverConfig::new(1e-15, 100);
        let f = |h: f64| (-2.0 * h).exp() - 0.5;
        let df = |h: f64| -2.0 * (-2.0 * h).exp();
        let result = newton_bracketed(f, df, 0.0, 5.0, 100.0, &config).unwrap();
        assert_relative_eq!(result.root, 2f64.ln() / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_bracketed_invalid() {
        let result =
            newton_bracketed(|x| x * x + 1.0, |x| 2.0 * x, -1.0, 1.0, 0.5, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_expand_upper_bracket() {
        let f = |x: f64| x - 7.3;
        let (a, b) = expand_upper_bracket(&f, 0.0, 0.5, 50).unwrap();
        assert!(a < 7.3 && 7.3 <= b);
        assert!(a > 0.0);

        let none = expand_upper_bracket(&|x: f64| x + 1.0, 0.0, 0.5, 10);
        assert!(matches!(none, Err(MathError::BracketNotFound { .. })));

        assert!(expand_upper_bracket(&f, 1.0, 1.0, 10).is_err());
    }
}
