//! The integrated-rate view shared by yield and credit curves.

/// A node-based curve whose integrated rate `rt(t)` is linear between nodes.
///
/// For a yield curve `rt` is the zero rate times time and `exp(−rt)` is the
/// discount factor. For a credit curve `rt` is the cumulative hazard and
/// `exp(−rt)` the survival probability. The CDS pricer only relies on this
/// trait, so any curve with piecewise-linear `rt` can be integrated exactly.
pub trait Curve: Send + Sync {
    /// Node times in years, strictly increasing and positive.
    fn times(&self) -> &[f64];

    /// Integrated rate at time `t` (any sign of `t` is accepted).
    fn rt(&self, t: f64) -> f64;

    /// Number of nodes.
    fn num_nodes(&self) -> usize {
        self.times().len()
    }

    /// Time of the last node.
    fn last_time(&self) -> f64 {
        self.times().last().copied().unwrap_or(0.0)
    }

    /// `exp(−rt(t))`: the discount factor or the survival probability.
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rt(t)).exp()
    }

    /// Continuously compounded average rate `rt(t)/t`.
    ///
    /// At `t = 0` this is the limit from the right, the first node's rate.
    fn zero_rate(&self, t: f64) -> f64 {
        if t == 0.0 {
            let t0 = self.times().first().copied().unwrap_or(1.0);
            return self.rt(t0) / t0;
        }
        self.rt(t) / t
    }

    /// Node times strictly inside `(start, end)`, in increasing order.
    fn times_between(&self, start: f64, end: f64) -> Vec<f64> {
        self.times()
            .iter()
            .copied()
            .filter(|&t| t > start && t < end)
            .collect()
    }
}
