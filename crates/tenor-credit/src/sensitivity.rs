//! Spread sensitivities (CS01) by bump and recalibration.
//!
//! CS01 is the change in clean value per unit notional when quotes move,
//! divided by the bump size:
//!
//! ```text
//! CS01 = (PV(curve from bumped quotes) − PV(curve from quotes)) / bump
//! ```
//!
//! Parallel CS01 bumps every pillar at once; bucketed CS01 bumps one pillar
//! at a time and rebuilds the whole curve each time. Bucketed runs are
//! independent and execute on the rayon thread pool.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use tenor_core::validation::Validate;
use tenor_curves::{CreditCurve, YieldCurve};

use crate::calibration::CreditCurveCalibrator;
use crate::cds::CdsAnalytic;
use crate::config::{CreditConfig, SensitivityConfig};
use crate::converter::QuoteConverter;
use crate::error::{CreditError, CreditResult};
use crate::pricer::PriceType;
use crate::quotes::CdsQuote;

/// Scale from one unit of spread to one basis point.
const ONE_BP: f64 = 1e-4;

/// How a bump is applied to a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BumpType {
    /// `s + a`
    #[default]
    Additive,
    /// `s·(1 + a)`
    Multiplicative,
}

impl BumpType {
    /// Bumps `value` by `amount`.
    pub fn apply(self, value: f64, amount: f64) -> f64 {
        match self {
            Self::Additive => value + amount,
            Self::Multiplicative => value * (1.0 + amount),
        }
    }
}

/// Value change for a one basis point move, for `notional`.
pub fn notional_cs01(cs01: f64, notional: f64) -> f64 {
    cs01 * notional * ONE_BP
}

/// Computes parallel and bucketed CS01.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::Date;
/// use tenor_credit::cds::CdsAnalyticBuilder;
/// use tenor_credit::sensitivity::SpreadSensitivityCalculator;
/// use tenor_curves::YieldCurve;
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let builder = CdsAnalyticBuilder::new(trade);
/// let cds = builder.standard(Date::from_ymd(2018, 6, 20).unwrap()).unwrap();
/// let yc = YieldCurve::flat(0.02);
///
/// let calculator = SpreadSensitivityCalculator::default();
/// let cs01 = calculator.parallel_cs01_from_quoted_spread(&cds, 0.01, &yc, 0.008).unwrap();
/// // close to the risky annuity of a five year CDS
/// assert!(cs01 > 4.0 && cs01 < 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadSensitivityCalculator {
    calibrator: CreditCurveCalibrator,
    config: SensitivityConfig,
}

impl Default for SpreadSensitivityCalculator {
    fn default() -> Self {
        Self::new(CreditCurveCalibrator::default(), SensitivityConfig::default())
    }
}

impl SpreadSensitivityCalculator {
    /// Creates a calculator.
    ///
    /// Base and bumped curves are rebuilt with the arbitrage policy of
    /// `config`, overriding the one of `calibrator`.
    pub fn new(calibrator: CreditCurveCalibrator, config: SensitivityConfig) -> Self {
        let calibration = calibrator.config().with_arbitrage_handling(config.arbitrage_handling);
        Self {
            calibrator: CreditCurveCalibrator::new(calibration),
            config,
        }
    }

    /// Creates a calculator from the calibration and sensitivity sections.
    pub fn from_config(config: &CreditConfig) -> Self {
        Self::new(CreditCurveCalibrator::new(config.calibration), config.sensitivity)
    }

    /// The calibrator used to rebuild curves.
    pub fn calibrator(&self) -> &CreditCurveCalibrator {
        &self.calibrator
    }

    /// The bump settings.
    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    fn converter(&self) -> QuoteConverter {
        QuoteConverter::new(self.calibrator)
    }

    fn value(&self, cds: &CdsAnalytic, coupon: f64, yc: &YieldCurve, cc: &CreditCurve) -> f64 {
        self.calibrator.pricer().pv(cds, yc, cc, coupon, PriceType::Clean)
    }

    fn bump(&self, spread: f64) -> f64 {
        self.config.bump_type.apply(spread, self.config.bump_amount)
    }

    // =========================================================================
    // PARALLEL CS01
    // =========================================================================

    /// Parallel CS01 of `cds` against a par spread term structure.
    pub fn parallel_cs01_from_par_spreads(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        pillars: &[CdsAnalytic],
        spreads: &[f64],
        yc: &YieldCurve,
    ) -> CreditResult<f64> {
        self.parallel_cs01_from_quotes(cds, coupon, pillars, &par_quotes(spreads), yc)
    }

    /// Parallel CS01 of `cds` quoted at a flat `quoted_spread`.
    ///
    /// The curve is the one-node curve that prices `cds` itself at the
    /// quoted spread.
    pub fn parallel_cs01_from_quoted_spread(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yc: &YieldCurve,
        quoted_spread: f64,
    ) -> CreditResult<f64> {
        self.config.validate_or_error()?;
        let base = self.calibrator.calibrate_single(cds, quoted_spread, yc)?;
        let bumped = self.calibrator.calibrate_single(cds, self.bump(quoted_spread), yc)?;
        Ok(self.difference(cds, coupon, yc, &base, &bumped))
    }

    /// Parallel CS01 of `cds` trading at `puf` up front on `coupon`.
    pub fn parallel_cs01_from_puf(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yc: &YieldCurve,
        puf: f64,
    ) -> CreditResult<f64> {
        let quoted_spread = self.converter().puf_to_quoted_spread(cds, coupon, yc, puf)?;
        self.parallel_cs01_from_quoted_spread(cds, coupon, yc, quoted_spread)
    }

    /// Parallel CS01 of `cds` against pillars quoted in any convention.
    ///
    /// Upfront quotes are first expressed as quoted spreads, so that every
    /// pillar carries a spread to bump.
    pub fn parallel_cs01_from_quotes(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<f64> {
        self.config.validate_or_error()?;
        let quotes = self.spread_quotes(pillars, quotes, yc)?;
        let bumped: Vec<CdsQuote> = quotes.iter().map(|q| self.bump_quote(q)).collect();

        let base = self.calibrator.calibrate_quotes(pillars, &quotes, yc)?;
        let bumped = self.calibrator.calibrate_quotes(pillars, &bumped, yc)?;
        Ok(self.difference(cds, coupon, yc, &base, &bumped))
    }

    // =========================================================================
    // BUCKETED CS01
    // =========================================================================

    /// Bucketed CS01 of `cds`, one entry per par spread pillar.
    pub fn bucketed_cs01_from_par_spreads(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        pillars: &[CdsAnalytic],
        spreads: &[f64],
        yc: &YieldCurve,
    ) -> CreditResult<Vec<f64>> {
        self.bucketed_cs01_from_quotes(cds, coupon, pillars, &par_quotes(spreads), yc)
    }

    /// Bucketed CS01 of `cds`, one entry per pillar.
    pub fn bucketed_cs01_from_quotes(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<Vec<f64>> {
        let matrix = self.bucketed_cs01_matrix(std::slice::from_ref(cds), &[coupon], pillars, quotes, yc)?;
        Ok(matrix.row(0).to_vec())
    }

    /// Bucketed CS01 of several trades against one set of pillars.
    ///
    /// Row `i` holds the buckets of `trades[i]` at `coupons[i]`. The bumped
    /// curves are built once and shared by every trade.
    pub fn bucketed_cs01_matrix(
        &self,
        trades: &[CdsAnalytic],
        coupons: &[f64],
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<Array2<f64>> {
        self.config.validate_or_error()?;
        if trades.len() != coupons.len() {
            return Err(CreditError::invalid_instrument(format!(
                "{} trades but {} coupons",
                trades.len(),
                coupons.len()
            )));
        }

        let quotes = self.spread_quotes(pillars, quotes, yc)?;
        let base = self.calibrator.calibrate_quotes(pillars, &quotes, yc)?;
        let bumped = self.bumped_curves(pillars, &quotes, yc)?;

        tracing::debug!(
            trades = trades.len(),
            buckets = bumped.len(),
            bump = self.config.bump_amount,
            parallel = self.config.parallel,
            "Computed bucketed CS01 curves"
        );

        let base_values: Vec<f64> = trades
            .iter()
            .zip(coupons)
            .map(|(cds, &coupon)| self.value(cds, coupon, yc, &base))
            .collect();

        Ok(Array2::from_shape_fn((trades.len(), bumped.len()), |(i, j)| {
            (self.value(&trades[i], coupons[i], yc, &bumped[j]) - base_values[i]) / self.config.bump_amount
        }))
    }

    /// One recalibrated curve per pillar, with only that pillar bumped.
    fn bumped_curves(
        &self,
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<Vec<CreditCurve>> {
        let build = |i: usize| {
            let mut bumped = quotes.to_vec();
            bumped[i] = self.bump_quote(&quotes[i]);
            self.calibrator.calibrate_quotes(pillars, &bumped, yc)
        };

        if self.config.parallel {
            (0..quotes.len()).into_par_iter().map(build).collect()
        } else {
            (0..quotes.len()).map(build).collect()
        }
    }

    fn difference(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yc: &YieldCurve,
        base: &CreditCurve,
        bumped: &CreditCurve,
    ) -> f64 {
        (self.value(cds, coupon, yc, bumped) - self.value(cds, coupon, yc, base)) / self.config.bump_amount
    }

    /// Replaces upfront quotes by the equivalent quoted spreads.
    fn spread_quotes(
        &self,
        pillars: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<Vec<CdsQuote>> {
        if pillars.len() != quotes.len() {
            return Err(CreditError::invalid_calibration_input(format!(
                "{} pillars but {} quotes",
                pillars.len(),
                quotes.len()
            )));
        }
        let converter = self.converter();
        pillars
            .iter()
            .zip(quotes)
            .map(|(pillar, quote)| {
                quote.check()?;
                match *quote {
                    CdsQuote::PointsUpFront { coupon, puf } => Ok(CdsQuote::QuotedSpread {
                        coupon,
                        spread: converter.puf_to_quoted_spread(pillar, coupon, yc, puf)?,
                    }),
                    spread_quote => Ok(spread_quote),
                }
            })
            .collect()
    }

    fn bump_quote(&self, quote: &CdsQuote) -> CdsQuote {
        match *quote {
            CdsQuote::ParSpread { spread } => CdsQuote::ParSpread {
                spread: self.bump(spread),
            },
            CdsQuote::QuotedSpread { coupon, spread } => CdsQuote::QuotedSpread {
                coupon,
                spread: self.bump(spread),
            },
            // upfront quotes are converted to spreads before bumping
            upfront @ CdsQuote::PointsUpFront { .. } => upfront,
        }
    }
}

fn par_quotes(spreads: &[f64]) -> Vec<CdsQuote> {
    spreads.iter().map(|&spread| CdsQuote::ParSpread { spread }).collect()
}
