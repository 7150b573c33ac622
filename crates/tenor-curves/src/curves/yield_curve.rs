//! ISDA-compliant yield curve.

use serde::{Deserialize, Serialize};

use super::{interpolate_rt, locate_node, validate_nodes, NodePosition};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Serialized form of a [`YieldCurve`]: node times and zero rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurveData {
    /// Node times in years.
    pub times: Vec<f64>,
    /// Continuously compounded zero rates at the nodes.
    pub zero_rates: Vec<f64>,
}

/// A discount curve with log-linear interpolation of discount factors.
///
/// Nodes hold continuously compounded zero rates `rᵢ` at times `tᵢ`, stored
/// as `rtᵢ = rᵢ·tᵢ`. Between nodes `rt` is linear (piecewise-constant
/// forward rates); before the first node the curve has the first node's zero
/// rate; beyond the last node the zero rate is held flat.
///
/// The curve is an immutable value. [`with_node`](Self::with_node) and
/// [`with_rate`](Self::with_rate) return new curves.
///
/// # Example
///
/// ```rust
/// use tenor_curves::{Curve, YieldCurve};
///
/// let curve = YieldCurve::new(vec![1.0, 2.0], vec![0.01, 0.02]).unwrap();
///
/// // Forward rate between the nodes is 3%
/// let fwd = (curve.rt(2.0) - curve.rt(1.0)) / 1.0;
/// assert!((fwd - 0.03).abs() < 1e-15);
///
/// // Flat zero rate beyond the last node
/// assert!((curve.zero_rate(10.0) - 0.02).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "YieldCurveData", into = "YieldCurveData")]
pub struct YieldCurve {
    times: Vec<f64>,
    rt: Vec<f64>,
}

impl YieldCurve {
    /// Builds a curve from node times and zero rates.
    pub fn new(times: Vec<f64>, zero_rates: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &zero_rates)?;
        let rt = times.iter().zip(&zero_rates).map(|(t, r)| t * r).collect();
        Ok(Self { times, rt })
    }

    /// Builds a curve from node times and integrated rates `rᵢ·tᵢ`.
    pub fn from_rt(times: Vec<f64>, rt: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &rt)?;
        Ok(Self { times, rt })
    }

    /// Trial curves inside a bootstrap, where the nodes are already checked.
    pub(crate) fn from_parts(times: Vec<f64>, rt: Vec<f64>) -> Self {
        debug_assert!(validate_nodes(&times, &rt).is_ok());
        Self { times, rt }
    }

    /// A flat curve: the same zero rate at every time.
    pub fn flat(rate: f64) -> Self {
        Self {
            times: vec![1.0],
            rt: vec![rate],
        }
    }

    /// Zero rates at the nodes.
    pub fn zero_rates(&self) -> Vec<f64> {
        self.times.iter().zip(&self.rt).map(|(t, rt)| rt / t).collect()
    }

    /// Integrated rates `rᵢ·tᵢ` at the nodes.
    pub fn rt_values(&self) -> &[f64] {
        &self.rt
    }

    /// Returns a curve with a node at `t` carrying zero rate `rate`.
    ///
    /// The node is appended beyond the last node, replaces an existing node
    /// at the same time, or splits the segment containing `t`.
    pub fn with_node(&self, t: f64, rate: f64) -> CurveResult<Self> {
        if !(t.is_finite() && t > 0.0) || !rate.is_finite() {
            return Err(CurveError::invalid_curve(format!(
                "cannot add node ({t}, {rate})"
            )));
        }
        let mut times = self.times.clone();
        let mut rt = self.rt.clone();
        match locate_node(&times, t) {
            NodePosition::Replace(i) => rt[i] = rate * t,
            NodePosition::Insert(i) => {
                times.insert(i, t);
                rt.insert(i, rate * t);
            }
        }
        Ok(Self { times, rt })
    }

    /// Returns a curve with the zero rate of node `index` replaced.
    pub fn with_rate(&self, index: usize, rate: f64) -> CurveResult<Self> {
        let t = *self.times.get(index).ok_or_else(|| {
            CurveError::invalid_curve(format!(
                "node {index} out of range for a {}-node curve",
                self.times.len()
            ))
        })?;
        self.with_node(t, rate)
    }

    /// Re-bases the curve to an origin `offset` years earlier.
    ///
    /// A curve bootstrapped from the spot date is moved onto the trade date by
    /// `with_base_offset(ACT/365F(trade, spot))`: discount factors become
    /// `P(t − δ)/P(−δ)`, with node times shifted by `δ`.
    pub fn with_base_offset(&self, offset: f64) -> CurveResult<Self> {
        if offset == 0.0 {
            return Ok(self.clone());
        }
        let shift = self.rt(-offset);
        let times: Vec<f64> = self.times.iter().map(|t| t + offset).collect();
        let rt: Vec<f64> = self.rt.iter().map(|rt| rt - shift).collect();
        Self::from_rt(times, rt)
    }

    /// Sensitivity of `rt(t)` to the zero rate of node `index`.
    ///
    /// Inside the node's segment `(t_{i−1}, t_i]` this is
    /// `(t − t_{i−1})·t_i/(t_i − t_{i−1})`; for the first node it is `t`.
    /// The last node also drives the flat extrapolation beyond it.
    pub fn rate_sensitivity(&self, t: f64, index: usize) -> f64 {
        let n = self.times.len();
        if index >= n {
            return 0.0;
        }
        let ti = self.times[index];

        if index + 1 == n && t > ti {
            return t;
        }
        if index == 0 {
            return if t <= ti {
                t
            } else if n > 1 && t < self.times[1] {
                ti * (self.times[1] - t) / (self.times[1] - ti)
            } else {
                0.0
            };
        }

        let prev = self.times[index - 1];
        if t <= prev {
            0.0
        } else if t <= ti {
            (t - prev) * ti / (ti - prev)
        } else if index + 1 < n && t < self.times[index + 1] {
            let next = self.times[index + 1];
            (next - t) * ti / (next - ti)
        } else {
            0.0
        }
    }
}

impl Curve for YieldCurve {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn rt(&self, t: f64) -> f64 {
        interpolate_rt(&self.times, &self.rt, t).unwrap_or_else(|| {
            let last = self.times.len() - 1;
            self.rt[last] / self.times[last] * t
        })
    }
}

impl TryFrom<YieldCurveData> for YieldCurve {
    type Error = CurveError;

    fn try_from(data: YieldCurveData) -> CurveResult<Self> {
        Self::new(data.times, data.zero_rates)
    }
}

impl From<YieldCurve> for YieldCurveData {
    fn from(curve: YieldCurve) -> Self {
        Self {
            zero_rates: curve.zero_rates(),
            times: curve.times,
        }
    }
}
