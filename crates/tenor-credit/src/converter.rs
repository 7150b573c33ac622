//! Conversions between par spreads, quoted spreads and points up front.
//!
//! The conventions are related through calibration, never by formula:
//!
//! - a par spread term structure calibrates a curve, which prices each
//!   pillar's points up front at its coupon
//! - a quoted spread calibrates a one-node flat curve for its own CDS
//! - points up front calibrate a curve directly
//!
//! A single par spread and its quoted spread coincide; the conversions only
//! differ on a term structure.

use tenor_curves::{CreditCurve, YieldCurve};

use crate::calibration::CreditCurveCalibrator;
use crate::cds::CdsAnalytic;
use crate::error::{CreditError, CreditResult};
use crate::pricer::AnalyticCdsPricer;
use crate::quotes::CdsQuote;

/// Converts CDS quotes between conventions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuoteConverter {
    calibrator: CreditCurveCalibrator,
}

impl QuoteConverter {
    /// Creates a converter around a calibrator.
    pub fn new(calibrator: CreditCurveCalibrator) -> Self {
        Self { calibrator }
    }

    /// The calibrator used by every conversion.
    pub fn calibrator(&self) -> &CreditCurveCalibrator {
        &self.calibrator
    }

    fn pricer(&self) -> &AnalyticCdsPricer {
        self.calibrator.pricer()
    }

    // =========================================================================
    // SINGLE CDS
    // =========================================================================

    /// Points up front of `cds` at `coupon` when quoted at `quoted_spread`.
    pub fn quoted_spread_to_puf(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yc: &YieldCurve,
        quoted_spread: f64,
    ) -> CreditResult<f64> {
        let flat = self.calibrator.calibrate_single(cds, quoted_spread, yc)?;
        Ok(self.pricer().points_upfront(cds, coupon, yc, &flat))
    }

    /// Quoted spread of `cds` trading at `puf` up front on `coupon`.
    pub fn puf_to_quoted_spread(
        &self,
        cds: &CdsAnalytic,
        coupon: f64,
        yc: &YieldCurve,
        puf: f64,
    ) -> CreditResult<f64> {
        let flat = self.calibrator.calibrate_single_upfront(cds, coupon, puf, yc)?;
        self.pricer().par_spread(cds, yc, &flat)
    }

    // =========================================================================
    // TERM STRUCTURES
    // =========================================================================

    /// Pillar-by-pillar points up front for quoted spreads.
    pub fn quoted_spreads_to_puf(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        quoted_spreads: &[f64],
    ) -> CreditResult<Vec<f64>> {
        check_lengths(cds, coupons, "coupons")?;
        check_lengths(cds, quoted_spreads, "quoted spreads")?;
        cds.iter()
            .zip(coupons)
            .zip(quoted_spreads)
            .map(|((c, &coupon), &spread)| self.quoted_spread_to_puf(c, coupon, yc, spread))
            .collect()
    }

    /// Pillar-by-pillar quoted spreads for points up front.
    pub fn puf_to_quoted_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        pufs: &[f64],
    ) -> CreditResult<Vec<f64>> {
        check_lengths(cds, coupons, "coupons")?;
        check_lengths(cds, pufs, "upfronts")?;
        cds.iter()
            .zip(coupons)
            .zip(pufs)
            .map(|((c, &coupon), &puf)| self.puf_to_quoted_spread(c, coupon, yc, puf))
            .collect()
    }

    /// Points up front at `coupons` implied by a par spread term structure.
    pub fn par_spreads_to_puf(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        par_spreads: &[f64],
    ) -> CreditResult<Vec<f64>> {
        check_lengths(cds, coupons, "coupons")?;
        let cc = self.calibrator.calibrate_par_spreads(cds, par_spreads, yc)?;
        Ok(cds
            .iter()
            .zip(coupons)
            .map(|(c, &coupon)| self.pricer().points_upfront(c, coupon, yc, &cc))
            .collect())
    }

    /// Quoted spreads at `coupons` implied by a par spread term structure.
    pub fn par_spreads_to_quoted_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        par_spreads: &[f64],
    ) -> CreditResult<Vec<f64>> {
        let pufs = self.par_spreads_to_puf(cds, coupons, yc, par_spreads)?;
        self.puf_to_quoted_spreads(cds, coupons, yc, &pufs)
    }

    /// Par spreads implied by points up front at `coupons`.
    pub fn puf_to_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        pufs: &[f64],
    ) -> CreditResult<Vec<f64>> {
        let cc = self.calibrator.calibrate(cds, coupons, yc, pufs)?;
        self.par_spreads(cds, yc, &cc)
    }

    /// Par spreads implied by quoted spreads at `coupons`.
    pub fn quoted_spreads_to_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupons: &[f64],
        yc: &YieldCurve,
        quoted_spreads: &[f64],
    ) -> CreditResult<Vec<f64>> {
        let pufs = self.quoted_spreads_to_puf(cds, coupons, yc, quoted_spreads)?;
        self.puf_to_par_spreads(cds, coupons, yc, &pufs)
    }

    /// Par spreads implied by quotes in any mix of conventions.
    pub fn to_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &YieldCurve,
    ) -> CreditResult<Vec<f64>> {
        for quote in quotes {
            quote.check()?;
        }
        let cc = self.calibrator.calibrate_quotes(cds, quotes, yc)?;
        self.par_spreads(cds, yc, &cc)
    }

    /// Par spread of every CDS under `cc`.
    pub fn par_spreads(
        &self,
        cds: &[CdsAnalytic],
        yc: &YieldCurve,
        cc: &CreditCurve,
    ) -> CreditResult<Vec<f64>> {
        cds.iter().map(|c| self.pricer().par_spread(c, yc, cc)).collect()
    }
}

fn check_lengths(cds: &[CdsAnalytic], values: &[f64], what: &str) -> CreditResult<()> {
    if cds.len() == values.len() {
        Ok(())
    } else {
        Err(CreditError::invalid_calibration_input(format!(
            "{} pillars but {} {what}",
            cds.len(),
            values.len()
        )))
    }
}
