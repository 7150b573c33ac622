//! ISDA-compliant credit (survival) curve.

use serde::{Deserialize, Serialize};

use super::{interpolate_rt, locate_node, validate_nodes, NodePosition};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Serialized form of a [`CreditCurve`]: node times and forward hazards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCurveData {
    /// Node times in years.
    pub times: Vec<f64>,
    /// Forward hazard rate on `(t_{i−1}, t_i]` for each node.
    pub forward_hazards: Vec<f64>,
}

/// A piecewise-constant hazard rate curve.
///
/// Node `i` carries the forward hazard `hᵢ` that applies on `(t_{i−1}, tᵢ]`
/// (from zero for the first node). The cumulative hazard
/// `H(t) = ∫₀ᵗ h(s) ds` is stored at the nodes and is linear in between, so
/// `Q(t) = exp(−H(t))` is exact. Beyond the last node the last hazard
/// continues.
///
/// Calibration extends the curve node by node with
/// [`with_node`](Self::with_node), which returns a new curve and leaves the
/// receiver valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CreditCurveData", into = "CreditCurveData")]
pub struct CreditCurve {
    times: Vec<f64>,
    hazards: Vec<f64>,
    cumulative: Vec<f64>,
}

impl CreditCurve {
    /// Builds a curve from node times and forward hazards.
    pub fn from_forward_hazards(times: Vec<f64>, hazards: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &hazards)?;
        let cumulative = integrate(&times, &hazards);
        Ok(Self {
            times,
            hazards,
            cumulative,
        })
    }

    /// Builds a curve from node times and cumulative hazards `H(tᵢ)`.
    pub fn from_cumulative_hazards(times: Vec<f64>, cumulative: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &cumulative)?;
        let hazards = differentiate(&times, &cumulative);
        Ok(Self {
            times,
            hazards,
            cumulative,
        })
    }

    /// Builds a curve from node times and survival probabilities.
    pub fn from_survival_probabilities(times: Vec<f64>, survival: &[f64]) -> CurveResult<Self> {
        if let Some(q) = survival.iter().find(|q| !(**q > 0.0 && **q <= 1.0)) {
            return Err(CurveError::invalid_market_data(format!(
                "survival probability {q} outside (0, 1]"
            )));
        }
        let cumulative = survival.iter().map(|q| -q.ln()).collect();
        Self::from_cumulative_hazards(times, cumulative)
    }

    /// A flat hazard curve.
    pub fn flat(hazard: f64) -> Self {
        Self {
            times: vec![1.0],
            hazards: vec![hazard],
            cumulative: vec![hazard],
        }
    }

    /// Forward hazards per node.
    pub fn forward_hazards(&self) -> &[f64] {
        &self.hazards
    }

    /// Cumulative hazards `H(tᵢ)` per node.
    pub fn cumulative_hazards(&self) -> &[f64] {
        &self.cumulative
    }

    /// Survival probability `Q(t) = exp(−H(t))`, with `Q(0) = 1`.
    pub fn survival_probability(&self, t: f64) -> f64 {
        self.discount_factor(t)
    }

    /// Instantaneous hazard at `t`: the forward hazard of the first node with
    /// `tᵢ ≥ t`, or the last hazard beyond the curve.
    pub fn hazard_rate(&self, t: f64) -> f64 {
        let i = self.times.partition_point(|&x| x < t);
        self.hazards[i.min(self.hazards.len() - 1)]
    }

    /// Average hazard `H(t)/t`.
    pub fn zero_hazard_rate(&self, t: f64) -> f64 {
        self.zero_rate(t)
    }

    /// Returns a curve with a node at `t` carrying forward hazard `hazard`.
    ///
    /// - beyond the last node: appended, `hazard` applies from the old last node
    /// - on an existing node: that node's forward hazard is replaced
    /// - inside a segment: the segment is split, `hazard` applies on the left
    ///   part and the old hazard keeps the right part
    ///
    /// Later nodes keep their forward hazards; cumulative hazards are
    /// recomputed.
    pub fn with_node(&self, t: f64, hazard: f64) -> CurveResult<Self> {
        if !(t.is_finite() && t > 0.0) || !hazard.is_finite() {
            return Err(CurveError::invalid_curve(format!(
                "cannot add node ({t}, {hazard})"
            )));
        }
        let mut times = self.times.clone();
        let mut hazards = self.hazards.clone();
        match locate_node(&times, t) {
            NodePosition::Replace(i) => hazards[i] = hazard,
            NodePosition::Insert(i) => {
                times.insert(i, t);
                hazards.insert(i, hazard);
            }
        }
        let cumulative = integrate(&times, &hazards);
        Ok(Self {
            times,
            hazards,
            cumulative,
        })
    }

    /// Returns a curve with the forward hazard of node `index` replaced.
    pub fn with_hazard(&self, index: usize, hazard: f64) -> CurveResult<Self> {
        let t = *self.times.get(index).ok_or_else(|| {
            CurveError::invalid_curve(format!(
                "node {index} out of range for a {}-node curve",
                self.times.len()
            ))
        })?;
        self.with_node(t, hazard)
    }

    /// Returns the curve made of the first `n` nodes.
    pub fn truncated(&self, n: usize) -> CurveResult<Self> {
        if n == 0 || n > self.times.len() {
            return Err(CurveError::invalid_curve(format!(
                "cannot keep {n} nodes of a {}-node curve",
                self.times.len()
            )));
        }
        Ok(Self {
            times: self.times[..n].to_vec(),
            hazards: self.hazards[..n].to_vec(),
            cumulative: self.cumulative[..n].to_vec(),
        })
    }

    /// Sensitivity of `H(t)` to the forward hazard of node `index`.
    ///
    /// This is the time spent in the node's segment up to `t`. The last node
    /// also drives the extrapolation, so its segment is open-ended.
    pub fn hazard_sensitivity(&self, t: f64, index: usize) -> f64 {
        let n = self.times.len();
        if index >= n {
            return 0.0;
        }
        let start = if index == 0 { 0.0 } else { self.times[index - 1] };
        if index == 0 && t < 0.0 {
            // H is linear through the origin before the first node
            return t;
        }
        let end = if index + 1 == n {
            f64::INFINITY
        } else {
            self.times[index]
        };
        (t.min(end) - start).max(0.0)
    }
}

impl Curve for CreditCurve {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn rt(&self, t: f64) -> f64 {
        interpolate_rt(&self.times, &self.cumulative, t).unwrap_or_else(|| {
            let last = self.times.len() - 1;
            self.cumulative[last] + self.hazards[last] * (t - self.times[last])
        })
    }
}

fn integrate(times: &[f64], hazards: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    let mut prev = 0.0;
    times
        .iter()
        .zip(hazards)
        .map(|(&t, &h)| {
            total += h * (t - prev);
            prev = t;
            total
        })
        .collect()
}

fn differentiate(times: &[f64], cumulative: &[f64]) -> Vec<f64> {
    let mut prev_t = 0.0;
    let mut prev_h = 0.0;
    times
        .iter()
        .zip(cumulative)
        .map(|(&t, &big_h)| {
            let h = (big_h - prev_h) / (t - prev_t);
            prev_t = t;
            prev_h = big_h;
            h
        })
        .collect()
}

impl TryFrom<CreditCurveData> for CreditCurve {
    type Error = CurveError;

    fn try_from(data: CreditCurveData) -> CurveResult<Self> {
        Self::from_forward_hazards(data.times, data.forward_hazards)
    }
}

impl From<CreditCurve> for CreditCurveData {
    fn from(curve: CreditCurve) -> Self {
        Self {
            times: curve.times,
            forward_hazards: curve.hazards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> CreditCurve {
        CreditCurve::from_forward_hazards(vec![0.5, 1.0, 3.0], vec![0.01, 0.02, 0.04]).unwrap()
    }

    #[test]
    fn test_survival_is_exact_integral() {
        let curve = sample();
        assert_eq!(curve.survival_probability(0.0), 1.0);
        assert_relative_eq!(curve.survival_probability(0.5), (-0.005f64).exp(), epsilon = 1e-16);
        assert_relative_eq!(curve.survival_probability(2.0), (-0.055f64).exp(), epsilon = 1e-16);
        // last hazard continues beyond the curve
        assert_relative_eq!(curve.rt(4.0), 0.095 + 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_hazard_rate_step_function() {
        let curve = sample();
        assert_eq!(curve.hazard_rate(0.2), 0.01);
        assert_eq!(curve.hazard_rate(0.5), 0.01);
        assert_eq!(curve.hazard_rate(0.500001), 0.02);
        assert_eq!(curve.hazard_rate(3.0), 0.04);
        assert_eq!(curve.hazard_rate(10.0), 0.04);
    }

    #[test]
    fn test_with_node_split_keeps_right_hazard() {
        let curve = sample();
        let split = curve.with_node(2.0, 0.03).unwrap();

        assert_eq!(split.forward_hazards(), &[0.01, 0.02, 0.03, 0.04]);
        assert_relative_eq!(split.rt(3.0), 0.005 + 0.01 + 0.03 + 0.04, epsilon = 1e-15);
        // original still valid
        assert_eq!(curve, sample());
    }

    #[test]
    fn test_with_hazard_and_truncate() {
        let curve = sample();
        let bumped = curve.with_hazard(1, 0.025).unwrap();
        assert_relative_eq!(bumped.rt(0.5), curve.rt(0.5));
        assert_relative_eq!(bumped.rt(3.0) - curve.rt(3.0), 0.0025, epsilon = 1e-15);

        let first_two = curve.truncated(2).unwrap();
        assert_eq!(first_two.times(), &[0.5, 1.0]);
        assert!(curve.truncated(0).is_err());
        assert!(curve.with_hazard(7, 0.01).is_err());
    }

    #[test]
    fn test_hazard_sensitivity_matches_bump() {
        let curve = sample();
        let h = 1e-7;
        for index in 0..3 {
            let bumped = curve.with_hazard(index, curve.forward_hazards()[index] + h).unwrap();
            for &t in &[-0.1, 0.25, 0.5, 0.75, 2.0, 3.0, 5.0] {
                let numeric = (bumped.rt(t) - curve.rt(t)) / h;
                assert_relative_eq!(curve.hazard_sensitivity(t, index), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_constructors_agree() {
        let curve = sample();
        let times = curve.times().to_vec();
        let from_h =
            CreditCurve::from_cumulative_hazards(times, curve.cumulative_hazards().to_vec()).unwrap();
        let q: Vec<f64> = curve.times().iter().map(|&t| curve.survival_probability(t)).collect();
        let from_q = CreditCurve::from_survival_probabilities(curve.times().to_vec(), &q).unwrap();

        for (a, b) in from_h.forward_hazards().iter().zip(curve.forward_hazards()) {
            assert_relative_eq!(a, b, epsilon = 1e-15);
        }
        for (a, b) in from_q.forward_hazards().iter().zip(curve.forward_hazards()) {
            assert_relative_eq!(a, b, epsilon = 1e-13);
        }
        assert!(CreditCurve::from_survival_probabilities(vec![1.0], &[1.2]).is_err());
    }
}
