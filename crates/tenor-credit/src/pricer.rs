//! Analytic CDS pricer of the ISDA standard model.
//!
//! Both legs are integrated exactly. Between consecutive knots of the yield
//! and credit curves `rt` and `ht` are linear in time, so
//! `∫ h(s)·P(s)·Q(s) ds` has a closed form on each interval. With
//! `b = exp(−rt − ht)` at the interval ends and `Δht`, `Δ(rt+ht)` the
//! increments:
//!
//! ```text
//! protection  = LGD · Σ Δht/Δ(rt+ht) · (b₀ − b₁)
//! annuity     = Σ τᵢ·P(payᵢ)·Q(endᵢ) + accrued on default
//! ```
//!
//! Near-zero `Δ(rt+ht)` switches to the ε-series forms of
//! [`tenor_math::functions`]. Values are rolled to the cash settle date.

use serde::{Deserialize, Serialize};

use tenor_curves::{CreditCurve, Curve, YieldCurve};
use tenor_math::functions::{epsilon, epsilon_p, epsilon_pp};

use crate::cds::{CdsAnalytic, CdsCoupon};
use crate::error::{CreditError, CreditResult};

/// Half a day in ACT/365F years.
const HALF_DAY: f64 = 1.0 / 730.0;

/// Below this `|Δ(rt+ht)|` the ε-series forms are used.
const SMALL_INCREMENT: f64 = 1e-5;

/// Accrued-on-default integral of the premium leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccrualOnDefaultFormula {
    /// ISDA standard model: accrual time carries a half-day offset.
    #[default]
    OriginalIsda,
    /// Markit's variant: accrual time restarts on every sub-interval.
    MarkitFix,
    /// The exact integral, without the half-day offset.
    Correct,
}

impl AccrualOnDefaultFormula {
    /// Offset added to the accrual time.
    pub fn omega(self) -> f64 {
        match self {
            Self::OriginalIsda => HALF_DAY,
            Self::MarkitFix | Self::Correct => 0.0,
        }
    }
}

impl std::fmt::Display for AccrualOnDefaultFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OriginalIsda => "Original ISDA",
            Self::MarkitFix => "Markit Fix",
            Self::Correct => "Correct",
        };
        write!(f, "{name}")
    }
}

/// Whether premium values include the accrued premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceType {
    /// Excluding accrued premium.
    #[default]
    Clean,
    /// Including accrued premium.
    Dirty,
}

/// Curve state at one integration knot.
#[derive(Debug, Clone, Copy)]
struct Knot {
    t: f64,
    rt: f64,
    ht: f64,
    b: f64,
    /// Sensitivity of `ht` to the node being differentiated.
    w: f64,
}

impl Knot {
    fn at(t: f64, yc: &YieldCurve, cc: &CreditCurve, index: Option<usize>) -> Self {
        let rt = yc.rt(t);
        let ht = cc.rt(t);
        Self {
            t,
            rt,
            ht,
            b: (-rt - ht).exp(),
            w: index.map_or(0.0, |i| cc.hazard_sensitivity(t, i)),
        }
    }
}

/// Interval increments shared by the leg integrals.
#[derive(Debug, Clone, Copy)]
struct Step {
    dt: f64,
    dht: f64,
    dhrt: f64,
}

impl Step {
    fn between(k0: &Knot, k1: &Knot) -> Self {
        let dht = k1.ht - k0.ht;
        Self {
            dt: k1.t - k0.t,
            dht,
            dhrt: dht + k1.rt - k0.rt,
        }
    }

    fn is_small(&self) -> bool {
        self.dhrt.abs() < SMALL_INCREMENT
    }
}

/// Knots of both curves strictly inside `(start, end)`, with the ends.
fn integration_points(start: f64, end: f64, yc: &YieldCurve, cc: &CreditCurve) -> Vec<f64> {
    let mut inner = yc.times_between(start, end);
    inner.extend(cc.times_between(start, end));
    inner.sort_by(f64::total_cmp);
    inner.dedup();

    let mut points = Vec::with_capacity(inner.len() + 2);
    points.push(start);
    points.extend(inner);
    points.push(end);
    points
}

/// Prices CDSs off a yield curve and a credit curve.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::Date;
/// use tenor_credit::cds::CdsAnalyticBuilder;
/// use tenor_credit::pricer::{AnalyticCdsPricer, PriceType};
/// use tenor_curves::{CreditCurve, YieldCurve};
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let cds = CdsAnalyticBuilder::new(trade)
///     .build(trade, Date::from_ymd(2018, 6, 20).unwrap())
///     .unwrap();
/// let yc = YieldCurve::flat(0.02);
/// let cc = CreditCurve::flat(0.01);
///
/// let pricer = AnalyticCdsPricer::default();
/// let spread = pricer.par_spread(&cds, &yc, &cc).unwrap();
/// assert!((spread - 0.006).abs() < 2e-4);
/// assert!(pricer.pv(&cds, &yc, &cc, spread, PriceType::Clean).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticCdsPricer {
    formula: AccrualOnDefaultFormula,
}

impl AnalyticCdsPricer {
    /// Creates a pricer with the given accrued-on-default formula.
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self { formula }
    }

    /// The accrued-on-default formula.
    pub fn formula(&self) -> AccrualOnDefaultFormula {
        self.formula
    }

    /// Value to the protection buyer per unit notional:
    /// `protection − coupon·annuity`.
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        yc: &YieldCurve,
        cc: &CreditCurve,
        coupon: f64,
        price_type: PriceType,
    ) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        self.protection_leg(cds, yc, cc) - coupon * self.annuity(cds, yc, cc, price_type)
    }

    /// Clean value at `coupon`: the points up front.
    pub fn points_upfront(&self, cds: &CdsAnalytic, coupon: f64, yc: &YieldCurve, cc: &CreditCurve) -> f64 {
        self.pv(cds, yc, cc, coupon, PriceType::Clean)
    }

    /// Coupon at which the clean value is zero.
    pub fn par_spread(&self, cds: &CdsAnalytic, yc: &YieldCurve, cc: &CreditCurve) -> CreditResult<f64> {
        let annuity = self.annuity(cds, yc, cc, PriceType::Clean);
        if !(annuity > 0.0) {
            return Err(CreditError::invalid_instrument(format!(
                "risky annuity {annuity} of CDS maturing {} admits no par spread",
                cds.maturity()
            )));
        }
        Ok(self.protection_leg(cds, yc, cc) / annuity)
    }

    /// Protection leg value per unit notional.
    pub fn protection_leg(&self, cds: &CdsAnalytic, yc: &YieldCurve, cc: &CreditCurve) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        let points = integration_points(cds.protection_start(), cds.protection_end(), yc, cc);

        let mut k0 = Knot::at(points[0], yc, cc, None);
        let mut pv = 0.0;
        for &t in &points[1..] {
            let k1 = Knot::at(t, yc, cc, None);
            let s = Step::between(&k0, &k1);
            pv += if s.is_small() {
                s.dht * k0.b * epsilon(-s.dhrt)
            } else {
                (k0.b - k1.b) * s.dht / s.dhrt
            };
            k0 = k1;
        }

        pv * cds.lgd() / yc.discount_factor(cds.valuation_time())
    }

    /// Risky annuity (RPV01): value of one unit of premium per year.
    pub fn annuity(
        &self,
        cds: &CdsAnalytic,
        yc: &YieldCurve,
        cc: &CreditCurve,
        price_type: PriceType,
    ) -> f64 {
        let mut pv = 0.0;
        for coupon in cds.coupons() {
            pv += coupon.year_fraction
                * yc.discount_factor(coupon.payment_time)
                * cc.survival_probability(coupon.effective_end);
            if cds.pay_accrued_on_default() {
                pv += self.accrual_on_default(cds, coupon, yc, cc);
            }
        }
        let dirty = pv / yc.discount_factor(cds.valuation_time());

        match price_type {
            PriceType::Clean => dirty - cds.accrued_year_fraction(),
            PriceType::Dirty => dirty,
        }
    }

    fn accrual_on_default(
        &self,
        cds: &CdsAnalytic,
        coupon: &CdsCoupon,
        yc: &YieldCurve,
        cc: &CreditCurve,
    ) -> f64 {
        let start = coupon.effective_start.max(cds.protection_start());
        if start >= coupon.effective_end {
            return 0.0;
        }
        let points = integration_points(start, coupon.effective_end, yc, cc);
        let omega = self.formula.omega();

        let mut k0 = Knot::at(start, yc, cc, None);
        let mut t0 = start - coupon.effective_start + omega;
        let mut pv = 0.0;
        for &t in &points[1..] {
            let k1 = Knot::at(t, yc, cc, None);
            let s = Step::between(&k0, &k1);

            pv += if self.formula == AccrualOnDefaultFormula::MarkitFix {
                if s.is_small() {
                    s.dht * s.dt * k0.b * epsilon_p(-s.dhrt)
                } else {
                    s.dht * s.dt / s.dhrt * ((k0.b - k1.b) / s.dhrt - k1.b)
                }
            } else {
                let t1 = t - coupon.effective_start + omega;
                let value = if s.is_small() {
                    s.dht * k0.b * (t0 * epsilon(-s.dhrt) + s.dt * epsilon_p(-s.dhrt))
                } else {
                    s.dht / s.dhrt * (t0 * k0.b - t1 * k1.b + s.dt / s.dhrt * (k0.b - k1.b))
                };
                t0 = t1;
                value
            };
            k0 = k1;
        }

        coupon.yc_ratio * pv
    }

    // =========================================================================
    // SENSITIVITIES TO ONE CREDIT CURVE NODE
    // =========================================================================

    /// Derivative of the clean value with respect to the forward hazard of
    /// credit curve node `index`.
    pub fn pv_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yc: &YieldCurve,
        cc: &CreditCurve,
        coupon: f64,
        index: usize,
    ) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        self.protection_leg_sensitivity(cds, yc, cc, index)
            - coupon * self.annuity_sensitivity(cds, yc, cc, index)
    }

    /// Derivative of the protection leg with respect to the forward hazard
    /// of credit curve node `index`.
    pub fn protection_leg_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yc: &YieldCurve,
        cc: &CreditCurve,
        index: usize,
    ) -> f64 {
        if cds.protection_end() <= 0.0 {
            return 0.0;
        }
        let points = integration_points(cds.protection_start(), cds.protection_end(), yc, cc);

        let mut k0 = Knot::at(points[0], yc, cc, Some(index));
        let mut sense = 0.0;
        for &t in &points[1..] {
            let k1 = Knot::at(t, yc, cc, Some(index));
            let s = Step::between(&k0, &k1);
            let e = epsilon(-s.dhrt);
            let p = epsilon_p(-s.dhrt);
            let d_end = k0.b * (e - s.dht * p);
            let d_start = k0.b * (-e * (1.0 + s.dht) + s.dht * p);
            sense += k1.w * d_end + k0.w * d_start;
            k0 = k1;
        }

        sense * cds.lgd() / yc.discount_factor(cds.valuation_time())
    }

    /// Derivative of the risky annuity with respect to the forward hazard of
    /// credit curve node `index`. Clean and dirty annuities share it.
    pub fn annuity_sensitivity(
        &self,
        cds: &CdsAnalytic,
        yc: &YieldCurve,
        cc: &CreditCurve,
        index: usize,
    ) -> f64 {
        let mut sense = 0.0;
        for coupon in cds.coupons() {
            let premium = coupon.year_fraction
                * yc.discount_factor(coupon.payment_time)
                * cc.survival_probability(coupon.effective_end);
            sense -= premium * cc.hazard_sensitivity(coupon.effective_end, index);
            if cds.pay_accrued_on_default() {
                sense += self.accrual_on_default_sensitivity(cds, coupon, yc, cc, index);
            }
        }
        sense / yc.discount_factor(cds.valuation_time())
    }

    fn accrual_on_default_sensitivity(
        &self,
        cds: &CdsAnalytic,
        coupon: &CdsCoupon,
        yc: &YieldCurve,
        cc: &CreditCurve,
        index: usize,
    ) -> f64 {
        let start = coupon.effective_start.max(cds.protection_start());
        if start >= coupon.effective_end {
            return 0.0;
        }
        let points = integration_points(start, coupon.effective_end, yc, cc);
        let omega = self.formula.omega();
        let markit = self.formula == AccrualOnDefaultFormula::MarkitFix;

        let mut k0 = Knot::at(start, yc, cc, Some(index));
        let mut sense = 0.0;
        for &t in &points[1..] {
            let k1 = Knot::at(t, yc, cc, Some(index));
            let s = Step::between(&k0, &k1);
            let t0 = if markit {
                0.0
            } else {
                k0.t - coupon.effective_start + omega
            };

            let e = epsilon(-s.dhrt);
            let p = epsilon_p(-s.dhrt);
            let pp = epsilon_pp(-s.dhrt);
            let a = t0 * e + s.dt * p;
            let c = t0 * p + s.dt * pp;
            let d_end = k0.b * (a - s.dht * c);
            let d_start = k0.b * (-(1.0 + s.dht) * a + s.dht * c);
            sense += k1.w * d_end + k0.w * d_start;
            k0 = k1;
        }

        coupon.yc_ratio * sense
    }
}
