//! ISDA standard model yield curve bootstrap.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tenor_core::calendars::{Calendar, WeekendCalendar};
use tenor_core::types::{Date, Period};
use tenor_core::validation::Validate;
use tenor_math::solvers::hybrid;

use crate::conventions::YieldCurveConventions;
use crate::curves::YieldCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Instrument types of the ISDA yield curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YieldInstrumentKind {
    /// Money-market deposit, simple interest.
    #[serde(alias = "M")]
    MoneyMarket,
    /// Par swap with a fixed leg paying at the swap interval.
    #[serde(alias = "S")]
    Swap,
}

/// A yield curve quote: instrument type, tenor from spot, and rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldCurveInstrument {
    /// Instrument type.
    pub kind: YieldInstrumentKind,
    /// Tenor from the spot date.
    pub tenor: Period,
    /// Deposit rate or par swap rate.
    pub rate: f64,
}

impl YieldCurveInstrument {
    /// A money-market deposit quote.
    pub fn money_market(tenor: Period, rate: f64) -> Self {
        Self {
            kind: YieldInstrumentKind::MoneyMarket,
            tenor,
            rate,
        }
    }

    /// A par swap quote.
    pub fn swap(tenor: Period, rate: f64) -> Self {
        Self {
            kind: YieldInstrumentKind::Swap,
            tenor,
            rate,
        }
    }
}

/// A fixed-leg cashflow: payment time from spot and accrual fraction.
#[derive(Debug, Clone, Copy)]
struct FixedPayment {
    time: f64,
    accrual: f64,
}

/// An instrument with its resolved maturity, ready to be solved.
#[derive(Debug, Clone, Copy)]
struct Pillar {
    instrument: YieldCurveInstrument,
    maturity: Date,
    time: f64,
}

/// Builds ISDA-compliant yield curves.
///
/// Node `i` sits at the adjusted maturity of instrument `i`:
///
/// - deposits: `DF = 1/(1 + rate·τ)` with `τ` the money-market accrual
/// - swaps: the par equation `rate·Σ τⱼ·DFⱼ + DFₙ = 1`, solved in closed form
///   when every earlier coupon falls on or before the previous node and with
///   a Newton/Brent root finder on the node zero rate otherwise
///
/// Curve times are measured from the spot date during the bootstrap; the
/// finished curve is re-based onto the trade date.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::{Date, Period};
/// use tenor_curves::prelude::*;
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let builder = IsdaYieldCurveBuilder::default();
/// let instruments = vec![
///     YieldCurveInstrument::money_market(Period::months(6), 0.004153),
///     YieldCurveInstrument::swap(Period::years(2), 0.004575),
///     YieldCurveInstrument::swap(Period::years(5), 0.012175),
/// ];
///
/// let curve = builder.build(trade, &instruments).unwrap();
/// assert_eq!(curve.num_nodes(), 3);
/// assert!(curve.discount_factor(5.0) < curve.discount_factor(2.0));
/// ```
#[derive(Clone)]
pub struct IsdaYieldCurveBuilder {
    conventions: YieldCurveConventions,
    calendar: Arc<dyn Calendar>,
}

impl Default for IsdaYieldCurveBuilder {
    fn default() -> Self {
        Self::new(YieldCurveConventions::isda_standard())
    }
}

impl fmt::Debug for IsdaYieldCurveBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsdaYieldCurveBuilder")
            .field("conventions", &self.conventions)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl IsdaYieldCurveBuilder {
    /// Creates a builder on a weekend-only calendar.
    pub fn new(conventions: YieldCurveConventions) -> Self {
        Self {
            conventions,
            calendar: Arc::new(WeekendCalendar),
        }
    }

    /// Replaces the business day calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// The conventions in use.
    pub fn conventions(&self) -> &YieldCurveConventions {
        &self.conventions
    }

    /// Spot date: the trade date moved forward by the spot lag.
    pub fn spot_date(&self, trade_date: Date) -> Date {
        self.calendar
            .add_business_days(trade_date, i32::try_from(self.conventions.spot_lag).unwrap_or(i32::MAX))
    }

    /// Builds the curve with the spot date implied by the spot lag.
    pub fn build(
        &self,
        trade_date: Date,
        instruments: &[YieldCurveInstrument],
    ) -> CurveResult<YieldCurve> {
        self.build_with_spot(trade_date, self.spot_date(trade_date), instruments)
    }

    /// Builds the curve from an explicit spot date.
    ///
    /// The returned curve measures time from `trade_date`.
    pub fn build_with_spot(
        &self,
        trade_date: Date,
        spot_date: Date,
        instruments: &[YieldCurveInstrument],
    ) -> CurveResult<YieldCurve> {
        self.conventions.validate_or_error()?;
        if instruments.is_empty() {
            return Err(CurveError::invalid_curve("no yield curve instruments"));
        }

        let pillars = self.pillars(spot_date, instruments)?;
        let mut times: Vec<f64> = Vec::with_capacity(pillars.len());
        let mut rates: Vec<f64> = Vec::with_capacity(pillars.len());

        for (index, pillar) in pillars.iter().enumerate() {
            let rate = match pillar.instrument.kind {
                YieldInstrumentKind::MoneyMarket => self.solve_money_market(spot_date, pillar)?,
                YieldInstrumentKind::Swap => {
                    self.solve_swap(index, spot_date, pillar, &times, &rates)?
                }
            };

            tracing::debug!(
                index,
                kind = ?pillar.instrument.kind,
                tenor = %pillar.instrument.tenor,
                maturity = %pillar.maturity,
                time = pillar.time,
                zero_rate = rate,
                "Yield curve node bootstrapped"
            );

            times.push(pillar.time);
            rates.push(rate);
        }

        let spot_curve = YieldCurve::new(times, rates)?;
        let offset = self
            .conventions
            .curve_day_count
            .year_fraction(trade_date, spot_date);
        spot_curve.with_base_offset(offset)
    }

    /// Resolves maturities and sorts instruments by node time.
    fn pillars(
        &self,
        spot_date: Date,
        instruments: &[YieldCurveInstrument],
    ) -> CurveResult<Vec<Pillar>> {
        let conv = &self.conventions;
        let mut pillars = instruments
            .iter()
            .map(|instrument| {
                if !instrument.rate.is_finite() {
                    return Err(CurveError::invalid_market_data(format!(
                        "{} rate is not finite",
                        instrument.tenor
                    )));
                }
                let unadjusted = spot_date.add_period(instrument.tenor)?;
                let maturity = self
                    .calendar
                    .adjust(unadjusted, conv.business_day_convention);
                let time = conv.curve_day_count.year_fraction(spot_date, maturity);
                if time <= 0.0 {
                    return Err(CurveError::invalid_curve(format!(
                        "instrument tenor {} does not mature after spot",
                        instrument.tenor
                    )));
                }
                Ok(Pillar {
                    instrument: *instrument,
                    maturity,
                    time,
                })
            })
            .collect::<CurveResult<Vec<_>>>()?;

        pillars.sort_by(|a, b| a.time.total_cmp(&b.time));
        if let Some(pair) = pillars.windows(2).find(|p| p[0].time >= p[1].time) {
            return Err(CurveError::invalid_curve(format!(
                "instruments {} and {} share the maturity {}",
                pair[0].instrument.tenor, pair[1].instrument.tenor, pair[1].maturity
            )));
        }
        Ok(pillars)
    }

    fn solve_money_market(&self, spot_date: Date, pillar: &Pillar) -> CurveResult<f64> {
        let accrual = self
            .conventions
            .money_market_day_count
            .year_fraction(spot_date, pillar.maturity);
        let df = 1.0 / (1.0 + pillar.instrument.rate * accrual);
        if !(df > 0.0 && df.is_finite()) {
            return Err(CurveError::invalid_market_data(format!(
                "deposit {} at {} implies discount factor {df}",
                pillar.instrument.tenor, pillar.instrument.rate
            )));
        }
        Ok(-df.ln() / pillar.time)
    }

    /// Fixed-leg schedule, generated backward from the unadjusted maturity.
    ///
    /// Payment dates are adjusted and every period accrues between adjusted
    /// dates.
    fn fixed_leg(&self, spot_date: Date, tenor: Period) -> CurveResult<Vec<FixedPayment>> {
        let conv = &self.conventions;
        let unadjusted_maturity = spot_date.add_period(tenor)?;

        let mut unadjusted = Vec::new();
        let mut k = 0;
        loop {
            let date = conv.swap_interval.times(-k).add_to(unadjusted_maturity)?;
            if date <= spot_date {
                break;
            }
            unadjusted.push(date);
            k += 1;
        }
        unadjusted.reverse();

        let mut accrual_start = spot_date;
        Ok(unadjusted
            .into_iter()
            .map(|date| {
                let pay = self.calendar.adjust(date, conv.business_day_convention);
                let payment = FixedPayment {
                    time: conv.curve_day_count.year_fraction(spot_date, pay),
                    accrual: conv.swap_day_count.year_fraction(accrual_start, pay),
                };
                accrual_start = pay;
                payment
            })
            .collect())
    }

    fn solve_swap(
        &self,
        index: usize,
        spot_date: Date,
        pillar: &Pillar,
        times: &[f64],
        rates: &[f64],
    ) -> CurveResult<f64> {
        let swap_rate = pillar.instrument.rate;
        let t = pillar.time;
        let payments = self.fixed_leg(spot_date, pillar.instrument.tenor)?;
        let Some((last, interim)) = payments.split_last() else {
            return Err(CurveError::invalid_curve(format!(
                "swap {} has no fixed payments",
                pillar.instrument.tenor
            )));
        };

        let prev_time = times.last().copied();
        let closed_form = interim
            .iter()
            .all(|p| prev_time.is_some_and(|prev| p.time <= prev));

        if closed_form {
            let annuity: f64 = if interim.is_empty() {
                0.0
            } else {
                let known = YieldCurve::new(times.to_vec(), rates.to_vec())?;
                interim
                    .iter()
                    .map(|p| p.accrual * known.discount_factor(p.time))
                    .sum()
            };
            let df = (1.0 - swap_rate * annuity) / (1.0 + swap_rate * last.accrual);
            if !(df > 0.0 && df.is_finite()) {
                return Err(CurveError::invalid_market_data(format!(
                    "swap {} at {swap_rate} implies discount factor {df}",
                    pillar.instrument.tenor
                )));
            }
            return Ok(-df.ln() / t);
        }

        let node_times: Vec<f64> = times.iter().copied().chain(std::iter::once(t)).collect();
        let known_rt: Vec<f64> = times.iter().zip(rates).map(|(t, r)| t * r).collect();
        let trial = |r: f64| {
            let mut rt = known_rt.clone();
            rt.push(r * t);
            YieldCurve::from_parts(node_times.clone(), rt)
        };
        let node = times.len();

        let par_gap = |r: f64| {
            let curve = trial(r);
            let annuity: f64 = payments
                .iter()
                .map(|p| p.accrual * curve.discount_factor(p.time))
                .sum();
            swap_rate * annuity + curve.discount_factor(t) - 1.0
        };
        let par_gap_derivative = |r: f64| {
            let curve = trial(r);
            let d_annuity: f64 = payments
                .iter()
                .map(|p| {
                    -p.accrual * curve.discount_factor(p.time) * curve.rate_sensitivity(p.time, node)
                })
                .sum();
            swap_rate * d_annuity - t * curve.discount_factor(t)
        };

        let guess = rates.last().copied().unwrap_or(swap_rate);
        hybrid(
            par_gap,
            par_gap_derivative,
            guess,
            None,
            &self.conventions.solver_config(),
        )
        .map(|result| result.root)
        .map_err(|e| CurveError::non_convergence(index, pillar.maturity, e.to_string()))
    }
}
