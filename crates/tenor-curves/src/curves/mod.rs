//! Curve types.
//!
//! - [`YieldCurve`]: zero rates with log-linear discount factors, flat zero
//!   rate beyond the last node
//! - [`CreditCurve`]: piecewise-constant forward hazards, flat last hazard
//!   beyond the last node

mod credit_curve;
mod yield_curve;

pub use credit_curve::CreditCurve;
pub use yield_curve::YieldCurve;

use crate::error::{CurveError, CurveResult};

/// Checks node times and values before a curve is built from them.
pub(crate) fn validate_nodes(times: &[f64], values: &[f64]) -> CurveResult<()> {
    if times.is_empty() {
        return Err(CurveError::invalid_curve("a curve needs at least one node"));
    }
    if times.len() != values.len() {
        return Err(CurveError::invalid_curve(format!(
            "{} node times but {} values",
            times.len(),
            values.len()
        )));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::invalid_curve(format!(
            "value at node {i} is not finite"
        )));
    }
    if !(times[0].is_finite() && times[0] > 0.0) {
        return Err(CurveError::invalid_curve(format!(
            "first node time must be positive, got {}",
            times[0]
        )));
    }
    for (i, pair) in times.windows(2).enumerate() {
        if !(pair[1].is_finite() && pair[1] > pair[0]) {
            return Err(CurveError::invalid_curve(format!(
                "node times must be strictly increasing: t[{}] = {} but t[{}] = {}",
                i,
                pair[0],
                i + 1,
                pair[1]
            )));
        }
    }
    Ok(())
}

/// Linear interpolation of `rt` up to the last node.
///
/// Before the first node `rt` is the straight line through the origin.
/// Returns `None` beyond the last node so that each curve can apply its own
/// extrapolation.
pub(crate) fn interpolate_rt(times: &[f64], rt: &[f64], t: f64) -> Option<f64> {
    let n = times.len();
    let t0 = times[0];
    if t <= t0 {
        return Some(rt[0] * t / t0);
    }
    if t > times[n - 1] {
        return None;
    }

    let i = times.partition_point(|&x| x < t);
    if times[i] == t {
        return Some(rt[i]);
    }
    let (t1, t2) = (times[i - 1], times[i]);
    Some(((t2 - t) * rt[i - 1] + (t - t1) * rt[i]) / (t2 - t1))
}

/// Where a new node at `t` lands among existing `times`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodePosition {
    /// Replaces the node at this index.
    Replace(usize),
    /// Inserted before the node at this index (may equal the length).
    Insert(usize),
}

pub(crate) fn locate_node(times: &[f64], t: f64) -> NodePosition {
    let i = times.partition_point(|&x| x < t);
    if i < times.len() && times[i] == t {
        NodePosition::Replace(i)
    } else {
        NodePosition::Insert(i)
    }
}
