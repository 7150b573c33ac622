//! # Tenor Curves
//!
//! ISDA-compliant term structures for the Tenor credit analytics library.
//!
//! This crate provides:
//!
//! - **Curve Trait**: [`Curve`], the integrated-rate view shared by discount
//!   and survival curves
//! - **Curve Types**: [`YieldCurve`] (log-linear discount factors) and
//!   [`CreditCurve`] (piecewise-constant hazard rates)
//! - **Bootstrap**: [`IsdaYieldCurveBuilder`], the ISDA standard model
//!   money-market and swap bootstrap
//! - **Conventions**: [`YieldCurveConventions`], serde-loadable and validated
//!
//! Both curve types store node times `tᵢ` and the integrated rate `rtᵢ`
//! (zero rate times time, or cumulative hazard). `rt` is linear between nodes,
//! which makes every discount factor and survival probability an exact
//! exponential and lets the CDS pricer integrate in closed form.
//!
//! ## Quick Start
//!
//! ```rust
//! use tenor_curves::prelude::*;
//!
//! let yc = YieldCurve::new(vec![1.0, 5.0], vec![0.01, 0.02]).unwrap();
//! let cc = CreditCurve::from_forward_hazards(vec![1.0, 5.0], vec![0.01, 0.03]).unwrap();
//!
//! assert_eq!(yc.discount_factor(0.0), 1.0);
//! assert!((cc.survival_probability(5.0) - (-0.13f64).exp()).abs() < 1e-15);
//!
//! // Curves are values: extending one leaves the original untouched
//! let extended = cc.with_node(10.0, 0.05).unwrap();
//! assert_eq!(cc.num_nodes(), 2);
//! assert_eq!(extended.num_nodes(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod conventions;
pub mod curves;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{IsdaYieldCurveBuilder, YieldCurveInstrument, YieldInstrumentKind};
    pub use crate::conventions::YieldCurveConventions;
    pub use crate::curves::{CreditCurve, YieldCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::traits::Curve;
}

pub use bootstrap::{IsdaYieldCurveBuilder, YieldCurveInstrument, YieldInstrumentKind};
pub use conventions::YieldCurveConventions;
pub use curves::{CreditCurve, YieldCurve};
pub use error::{CurveError, CurveResult};
pub use traits::Curve;
