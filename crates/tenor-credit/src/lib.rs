//! # Tenor Credit
//!
//! ISDA standard model CDS analytics for the Tenor library.
//!
//! This crate provides:
//!
//! - **Contracts**: [`CdsAnalyticBuilder`] turns dates and [`CdsConventions`]
//!   into a [`CdsAnalytic`], the contract reduced to curve times
//! - **Pricing**: [`AnalyticCdsPricer`] integrates both legs in closed form and
//!   differentiates them with respect to credit curve nodes
//! - **Calibration**: [`CreditCurveCalibrator`] bootstraps a hazard curve from
//!   par spreads, quoted spreads or points up front
//! - **Quotes**: [`CdsQuote`] and the [`QuoteConverter`]
//! - **Risk**: [`SpreadSensitivityCalculator`] for parallel and bucketed CS01
//! - **Dispatch**: [`PricingTable`], pricing functions keyed by instrument and
//!   model
//!
//! ## Quick Start
//!
//! ```rust
//! use tenor_credit::prelude::*;
//! use tenor_core::types::Date;
//! use tenor_curves::YieldCurve;
//!
//! let trade = Date::from_ymd(2013, 6, 4).unwrap();
//! let builder = CdsAnalyticBuilder::new(trade);
//! let maturities: Vec<Date> = [2014, 2016, 2018]
//!     .iter()
//!     .map(|&y| Date::from_ymd(y, 6, 20).unwrap())
//!     .collect();
//! let pillars = builder.build_many(trade, &maturities).unwrap();
//! let spreads = [0.004, 0.006, 0.008];
//! let yc = YieldCurve::flat(0.015);
//!
//! let trade_cds = builder.standard(Date::from_ymd(2017, 6, 20).unwrap()).unwrap();
//! let calculator = SpreadSensitivityCalculator::default();
//! let buckets = calculator
//!     .bucketed_cs01_from_par_spreads(&trade_cds, 0.01, &pillars, &spreads, &yc)
//!     .unwrap();
//!
//! // the 2017 trade never reaches beyond the 2018 pillar
//! assert_eq!(buckets.len(), 3);
//! assert!(buckets[2] > 0.0);
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
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod calibration;
pub mod cds;
pub mod config;
pub mod converter;
pub mod dispatch;
pub mod error;
pub mod imm;
pub mod pricer;
pub mod quotes;
pub mod schedule;
pub mod sensitivity;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{ArbitrageHandling, CreditCurveCalibrator};
    pub use crate::cds::{CdsAnalytic, CdsAnalyticBuilder, CdsCoupon};
    pub use crate::config::{CalibrationConfig, CdsConventions, CreditConfig, SensitivityConfig};
    pub use crate::converter::QuoteConverter;
    pub use crate::dispatch::{CreditMarket, Instrument, InstrumentKind, ModelKind, PricingTable};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::pricer::{AccrualOnDefaultFormula, AnalyticCdsPricer, PriceType};
    pub use crate::quotes::CdsQuote;
    pub use crate::schedule::{PremiumLegSchedule, StubType};
    pub use crate::sensitivity::{notional_cs01, BumpType, SpreadSensitivityCalculator};
}

pub use calibration::{ArbitrageHandling, CreditCurveCalibrator};
pub use cds::{CdsAnalytic, CdsAnalyticBuilder};
pub use config::{CalibrationConfig, CdsConventions, CreditConfig, SensitivityConfig};
pub use converter::QuoteConverter;
pub use dispatch::{Instrument, ModelKind, PricingTable};
pub use error::{CreditError, CreditResult};
pub use pricer::{AccrualOnDefaultFormula, AnalyticCdsPricer, PriceType};
pub use quotes::CdsQuote;
pub use sensitivity::{BumpType, SpreadSensitivityCalculator};
