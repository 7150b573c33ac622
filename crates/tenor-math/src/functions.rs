//! The ε-family of functions.
//!
//! Integrals of `exp(−a·t)` over an interval of length one reduce to
//! ε(x) = (eˣ − 1)/x. Its closed form loses every significant digit as
//! x → 0, so each function switches to a truncated Taylor series below a
//! small threshold. The truncation error at the threshold is far below
//! machine precision.

/// Below this |x| the ε series is used.
const EPSILON_SERIES_THRESHOLD: f64 = 1e-5;

/// Below this |x| the derivative series are used.
const DERIVATIVE_SERIES_THRESHOLD: f64 = 1e-3;

/// ε(x) = (eˣ − 1)/x, with ε(0) = 1.
///
/// ```rust
/// use tenor_math::functions::epsilon;
///
/// assert_eq!(epsilon(0.0), 1.0);
/// assert!((epsilon(1.0) - (1f64.exp() - 1.0)).abs() < 1e-15);
/// ```
#[inline]
pub fn epsilon(x: f64) -> f64 {
    if x.abs() > EPSILON_SERIES_THRESHOLD {
        x.exp_m1() / x
    } else {
        1.0 + x * (1.0 / 2.0 + x * (1.0 / 6.0 + x * (1.0 / 24.0 + x / 120.0)))
    }
}

/// First derivative of ε: (x·eˣ − eˣ + 1)/x², with value 1/2 at zero.
#[inline]
pub fn epsilon_p(x: f64) -> f64 {
    if x.abs() > DERIVATIVE_SERIES_THRESHOLD {
        (x * x.exp() - x.exp_m1()) / (x * x)
    } else {
        1.0 / 2.0 + x * (1.0 / 3.0 + x * (1.0 / 8.0 + x * (1.0 / 30.0 + x / 144.0)))
    }
}

/// Second derivative of ε: (x²eˣ − 2x·eˣ + 2(eˣ − 1))/x³, with value 1/3 at zero.
#[inline]
pub fn epsilon_pp(x: f64) -> f64 {
    if x.abs() > DERIVATIVE_SERIES_THRESHOLD {
        let ex = x.exp();
        (x * x * ex - 2.0 * x * ex + 2.0 * x.exp_m1()) / (x * x * x)
    } else {
        1.0 / 3.0 + x * (1.0 / 4.0 + x * (1.0 / 10.0 + x * (1.0 / 36.0 + x / 168.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_values_at_zero() {
        assert_eq!(epsilon(0.0), 1.0);
        assert_eq!(epsilon_p(0.0), 0.5);
        assert_relative_eq!(epsilon_pp(0.0), 1.0 / 3.0);
    }

    #[test]
    fn test_closed_form_away_from_zero() {
        let x: f64 = -0.35;
        let ex = x.exp();
        assert_relative_eq!(epsilon(x), (ex - 1.0) / x, epsilon = 1e-15);
        assert_relative_eq!(epsilon_p(x), (x * ex - ex + 1.0) / (x * x), epsilon = 1e-14);
    }

    #[test]
    fn test_continuous_across_thresholds() {
        for &t in &[EPSILON_SERIES_THRESHOLD, DERIVATIVE_SERIES_THRESHOLD] {
            for sign in [-1.0, 1.0] {
                let below = sign * t * (1.0 - 1e-9);
                let above = sign * t * (1.0 + 1e-9);
                assert_relative_eq!(epsilon(below), epsilon(above), max_relative = 1e-10);
                assert_relative_eq!(epsilon_p(below), epsilon_p(above), max_relative = 1e-9);
                assert_relative_eq!(epsilon_pp(below), epsilon_pp(above), max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_epsilon_p_is_derivative() {
        let h = 1e-6;
        for &x in &[-2.0, -0.1, 0.05, 0.7] {
            let numeric = (epsilon(x + h) - epsilon(x - h)) / (2.0 * h);
            assert_relative_eq!(epsilon_p(x), numeric, max_relative = 1e-7);

            let numeric_pp = (epsilon_p(x + h) - epsilon_p(x - h)) / (2.0 * h);
            assert_relative_eq!(epsilon_pp(x), numeric_pp, max_relative = 1e-6);
        }
    }

    proptest! {
        #[test]
        fn prop_epsilon_positive_and_increasing(x in -20.0f64..20.0, dx in 1e-3f64..1.0) {
            prop_assert!(epsilon(x) > 0.0);
            prop_assert!(epsilon(x + dx) > epsilon(x));
        }
    }
}
