//! Curve construction from market instruments.
//!
//! [`IsdaYieldCurveBuilder`] reproduces the ISDA CDS standard model yield
//! curve: money-market deposits solved in closed form, then par swaps solved
//! node by node.

mod isda;

pub use isda::{IsdaYieldCurveBuilder, YieldCurveInstrument, YieldInstrumentKind};
