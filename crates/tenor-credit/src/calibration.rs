//! Sequential bootstrap of ISDA credit curves.
//!
//! Pillar CDSs are processed in order of protection end. Each one adds a
//! node at its protection end whose forward hazard is solved so that the
//! CDS reprices to its quoted points up front. Earlier nodes are fixed, so
//! calibrating a prefix of the pillars yields a prefix of the nodes.

use std::slice;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tenor_curves::{CreditCurve, CurveResult, YieldCurve};
use tenor_math::solvers::{expand_upper_bracket, newton_bracketed};
use tenor_math::MathError;

use crate::cds::CdsAnalytic;
use crate::config::CalibrationConfig;
use crate::error::{CreditError, CreditResult};
use crate::pricer::{AnalyticCdsPricer, PriceType};
use crate::quotes::CdsQuote;

/// Bracket expansions before a node is reported as unsolvable.
const MAX_EXPANSIONS: u32 = 100;

/// Initial bracket width when the analytic guess is unusable.
const FALLBACK_WIDTH: f64 = 1e-2;

/// What to do when a quote needs a negative forward hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArbitrageHandling {
    /// Reject the quotes.
    #[default]
    Fail,
    /// Floor the node's hazard at zero and carry on.
    ZeroHazardRate,
    /// Solve for the negative hazard.
    Ignore,
}

/// Bootstraps credit curves from CDS quotes.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::Date;
/// use tenor_credit::calibration::CreditCurveCalibrator;
/// use tenor_credit::cds::CdsAnalyticBuilder;
/// use tenor_credit::pricer::AnalyticCdsPricer;
/// use tenor_curves::YieldCurve;
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let builder = CdsAnalyticBuilder::new(trade);
/// let maturities = [Date::from_ymd(2014, 6, 20).unwrap(), Date::from_ymd(2018, 6, 20).unwrap()];
/// let pillars = builder.build_many(trade, &maturities).unwrap();
/// let yc = YieldCurve::flat(0.02);
///
/// let calibrator = CreditCurveCalibrator::default();
/// let cc = calibrator.calibrate_par_spreads(&pillars, &[0.005, 0.009], &yc).unwrap();
///
/// let pricer = AnalyticCdsPricer::default();
/// let spread = pricer.par_spread(&pillars[1], &yc, &cc).unwrap();
/// assert!((spread - 0.009).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CreditCurveCalibrator {
    pricer: AnalyticCdsPricer,
    config: CalibrationConfig,
}

impl CreditCurveCalibrator {
    /// Creates a calibrator; the pricer uses the configured accrual formula.
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            pricer: AnalyticCdsPricer::new(config.accrual_on_default),
            config,
        }
    }

    /// The pricer that pillars are repriced with.
    pub fn pricer(&self) -> &AnalyticCdsPricer {
        &self.pricer
    }

    /// The calibration settings.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Calibrates to pillars trading at running `premiums` plus `pufs` up
    /// front.
    pub fn calibrate(
        &self,
        cds: &[CdsAnalytic],
        premiums: &[f64],
        yc: &YieldCurve,
        pufs: &[f64],
    ) -> CreditResult<CreditCurve> {
        check_inputs(cds, premiums, pufs)?;

        let mut curve: Option<CreditCurve> = None;
        for (index, pillar) in cds.iter().enumerate() {
            let base = curve.as_ref();
            let hazard = self.solve_node(index, pillar, premiums[index], pufs[index], yc, base)?;
            curve = Some(extend(base, pillar.protection_end(), hazard)?);
        }

        curve.ok_or_else(|| CreditError::invalid_calibration_input("no pillars to calibrate"))
    }

    /// Calibrates to par spreads.
    pub fn calibrate_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        spreads: &[f64],
        yc: &YieldCurve,
    ) -> CreditResult<CreditCurve> {
        self.calibrate(cds, spreads, yc, &vec![0.0; spreads.len()])
    }

    /// Flat curve that prices `cds` at par at `spread`.
    pub fn calibrate_single(&self, cds: &CdsAnalytic, spread: f64, yc: &YieldCurve) -> CreditResult<CreditCurve> {
        self.calibrate(slice::from_ref(cds), &[spread], yc, &[0.0])
    }

    /// Flat curve under which `cds` with `premium` is worth `puf`.
    pub fn calibrate_single_upfront(
        &self,
        cds: &CdsAnalytic,
        premium: f64,
        puf: f64,
        yc: &YieldCurve,
    ) -> CreditResult<CreditCurve> {
        self.calibrate(slice::from_ref(cds), &[premium], yc, &[puf])
    }

    /// Calibrates to pillars quoted in any mix of conventions.
    pub fn calibrate_quotes(
        &self,
        cds: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<CreditCurve> {
        if cds.len() != quotes.len() {
            return Err(CreditError::invalid_calibration_input(format!(
                "{} pillars but {} quotes",
                cds.len(),
                quotes.len()
            )));
        }
        let (premiums, pufs): (Vec<f64>, Vec<f64>) = cds
            .iter()
            .zip(quotes)
            .map(|(pillar, quote)| self.premium_and_upfront(pillar, quote, yc))
            .collect::<CreditResult<Vec<_>>>()?
            .into_iter()
            .unzip();
        self.calibrate(cds, &premiums, yc, &pufs)
    }

    /// Running premium and points up front equivalent to `quote` on `cds`.
    ///
    /// A quoted spread is turned into points up front through the flat curve
    /// it implies.
    pub fn premium_and_upfront(
        &self,
        cds: &CdsAnalytic,
        quote: &CdsQuote,
        yc: &YieldCurve,
    ) -> CreditResult<(f64, f64)> {
        match *quote {
            CdsQuote::ParSpread { spread } => Ok((spread, 0.0)),
            CdsQuote::PointsUpFront { coupon, puf } => Ok((coupon, puf)),
            CdsQuote::QuotedSpread { coupon, spread } => {
                let flat = self.calibrate_single(cds, spread, yc)?;
                Ok((coupon, self.pricer.points_upfront(cds, coupon, yc, &flat)))
            }
        }
    }

    fn solve_node(
        &self,
        index: usize,
        cds: &CdsAnalytic,
        premium: f64,
        puf: f64,
        yc: &YieldCurve,
        base: Option<&CreditCurve>,
    ) -> CreditResult<f64> {
        let t = cds.protection_end();
        let pricer = &self.pricer;

        let f = |h: f64| {
            extend(base, t, h).map_or(f64::NAN, |cc| {
                pricer.pv(cds, yc, &cc, premium, PriceType::Clean) - puf
            })
        };
        let df = |h: f64| {
            extend(base, t, h).map_or(f64::NAN, |cc| {
                pricer.pv_sensitivity(cds, yc, &cc, premium, index)
            })
        };
        let not_solved = |e: MathError| CreditError::non_convergence(index, cds.maturity(), e.to_string());

        let guess = (premium + puf / t) / cds.lgd();
        let f_zero = f(0.0);
        if f_zero == 0.0 {
            return Ok(0.0);
        }

        let (lower, upper) = if f_zero > 0.0 {
            match self.config.arbitrage_handling {
                ArbitrageHandling::Fail => {
                    return Err(CreditError::invalid_market_data(format!(
                        "pillar {index} maturing {} needs a negative forward hazard",
                        cds.maturity()
                    )));
                }
                ArbitrageHandling::ZeroHazardRate => {
                    warn!(
                        index,
                        maturity = %cds.maturity(),
                        "Negative forward hazard floored at zero"
                    );
                    return Ok(0.0);
                }
                ArbitrageHandling::Ignore => {
                    let mirrored = |x: f64| f(-x);
                    let start = if guess < 0.0 { -guess } else { FALLBACK_WIDTH };
                    let (a, b) = expand_upper_bracket(&mirrored, 0.0, start, MAX_EXPANSIONS)
                        .map_err(not_solved)?;
                    (-b, -a)
                }
            }
        } else {
            let start = if guess > 0.0 { guess } else { FALLBACK_WIDTH };
            expand_upper_bracket(&f, 0.0, start, MAX_EXPANSIONS).map_err(not_solved)?
        };

        let result = newton_bracketed(&f, &df, lower, upper, guess, &self.config.solver_config())
            .map_err(not_solved)?;

        debug!(
            index,
            time = t,
            hazard = result.root,
            iterations = result.iterations,
            "Calibrated credit curve node"
        );
        Ok(result.root)
    }
}

/// `base` with one more node, or a one-node curve.
fn extend(base: Option<&CreditCurve>, t: f64, hazard: f64) -> CurveResult<CreditCurve> {
    match base {
        Some(curve) => curve.with_node(t, hazard),
        None => CreditCurve::from_forward_hazards(vec![t], vec![hazard]),
    }
}

fn check_inputs(cds: &[CdsAnalytic], premiums: &[f64], pufs: &[f64]) -> CreditResult<()> {
    if cds.is_empty() {
        return Err(CreditError::invalid_calibration_input("no pillars to calibrate"));
    }
    if premiums.len() != cds.len() || pufs.len() != cds.len() {
        return Err(CreditError::invalid_calibration_input(format!(
            "{} pillars but {} premiums and {} upfronts",
            cds.len(),
            premiums.len(),
            pufs.len()
        )));
    }
    if let Some(i) = premiums
        .iter()
        .zip(pufs)
        .position(|(p, u)| !(p.is_finite() && u.is_finite()))
    {
        return Err(CreditError::invalid_market_data(format!(
            "quote of pillar {i} is not finite"
        )));
    }

    let mut previous = 0.0;
    for (i, pillar) in cds.iter().enumerate() {
        let t = pillar.protection_end();
        if !(t > previous) {
            return Err(CreditError::invalid_calibration_input(format!(
                "pillar {i} maturing {} does not extend the curve (protection end {t} after {previous})",
                pillar.maturity()
            )));
        }
        previous = t;
    }
    Ok(())
}
