//! Analytic CDS description.
//!
//! A [`CdsAnalytic`] reduces a CDS contract to the year fractions the pricer
//! needs: payment and accrual times of each remaining coupon, protection
//! start and end, and the valuation (cash settle) time, all measured from
//! the trade date.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tenor_core::calendars::{Calendar, WeekendCalendar};
use tenor_core::types::{Date, Period};
use tenor_core::validation::Validate;

use crate::config::CdsConventions;
use crate::error::{CreditError, CreditResult};
use crate::imm::{previous_imm_date, standard_maturity};
use crate::schedule::{AccrualPeriod, PremiumLegSchedule};

/// One premium coupon in curve time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsCoupon {
    /// Payment time.
    pub payment_time: f64,
    /// Start of protection for accrual on default.
    pub effective_start: f64,
    /// End of protection for accrual on default; survival is read here.
    pub effective_end: f64,
    /// Accrual year fraction.
    pub year_fraction: f64,
    /// Accrual year fraction over curve year fraction of the period.
    pub yc_ratio: f64,
}

impl CdsCoupon {
    fn new(
        trade_date: Date,
        period: &AccrualPeriod,
        conventions: &CdsConventions,
    ) -> Self {
        let curve = conventions.curve_day_count;
        let shift = i64::from(conventions.protection_start);
        let effective_start = period.accrual_start.add_days(-shift);
        let effective_end = period.accrual_end.add_days(-shift);
        let year_fraction = conventions
            .accrual_day_count
            .year_fraction(period.accrual_start, period.accrual_end);

        Self {
            payment_time: curve.year_fraction(trade_date, period.payment),
            effective_start: curve.year_fraction(trade_date, effective_start),
            effective_end: curve.year_fraction(trade_date, effective_end),
            year_fraction,
            yc_ratio: year_fraction / curve.year_fraction(period.accrual_start, period.accrual_end),
        }
    }
}

/// A CDS reduced to curve times.
///
/// Two instances built from the same dates and conventions are
/// interchangeable for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsAnalytic {
    maturity: Date,
    coupons: Vec<CdsCoupon>,
    protection_start: f64,
    protection_end: f64,
    valuation_time: f64,
    accrued_year_fraction: f64,
    lgd: f64,
    pay_accrued_on_default: bool,
    protection_from_start_of_day: bool,
}

impl CdsAnalytic {
    /// Maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Remaining coupons.
    pub fn coupons(&self) -> &[CdsCoupon] {
        &self.coupons
    }

    /// Number of remaining coupons.
    pub fn num_coupons(&self) -> usize {
        self.coupons.len()
    }

    /// Time protection starts.
    pub fn protection_start(&self) -> f64 {
        self.protection_start
    }

    /// Time protection ends.
    pub fn protection_end(&self) -> f64 {
        self.protection_end
    }

    /// Cash settle time; values are quoted for payment on this date.
    pub fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    /// Premium accrued from the current period start to step-in.
    pub fn accrued_year_fraction(&self) -> f64 {
        self.accrued_year_fraction
    }

    /// Accrued premium per unit notional at `coupon`.
    pub fn accrued_premium(&self, coupon: f64) -> f64 {
        coupon * self.accrued_year_fraction
    }

    /// Loss given default, one minus recovery.
    pub fn lgd(&self) -> f64 {
        self.lgd
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> f64 {
        1.0 - self.lgd
    }

    /// True if accrued premium is paid on default.
    pub fn pay_accrued_on_default(&self) -> bool {
        self.pay_accrued_on_default
    }

    /// True if protection runs from the start of the step-in day.
    pub fn protection_from_start_of_day(&self) -> bool {
        self.protection_from_start_of_day
    }

    /// Same contract with another recovery rate.
    pub fn with_recovery_rate(&self, recovery_rate: f64) -> CreditResult<Self> {
        check_recovery(recovery_rate)?;
        Ok(Self {
            lgd: 1.0 - recovery_rate,
            ..self.clone()
        })
    }
}

fn check_recovery(recovery_rate: f64) -> CreditResult<()> {
    if (0.0..1.0).contains(&recovery_rate) {
        Ok(())
    } else {
        Err(CreditError::invalid_instrument(format!(
            "recovery rate {recovery_rate} outside [0, 1)"
        )))
    }
}

/// Builds [`CdsAnalytic`]s traded on one date.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::Date;
/// use tenor_credit::cds::CdsAnalyticBuilder;
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let builder = CdsAnalyticBuilder::new(trade);
/// let cds = builder.build(trade, Date::from_ymd(2018, 6, 20).unwrap()).unwrap();
///
/// assert_eq!(cds.num_coupons(), 21);
/// assert!((cds.protection_end() - 1842.0 / 365.0).abs() < 1e-15);
/// ```
#[derive(Clone)]
pub struct CdsAnalyticBuilder {
    trade_date: Date,
    conventions: CdsConventions,
    calendar: Arc<dyn Calendar>,
}

impl fmt::Debug for CdsAnalyticBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdsAnalyticBuilder")
            .field("trade_date", &self.trade_date)
            .field("conventions", &self.conventions)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl CdsAnalyticBuilder {
    /// ISDA standard conventions on a weekend-only calendar.
    pub fn new(trade_date: Date) -> Self {
        Self {
            trade_date,
            conventions: CdsConventions::isda_standard(),
            calendar: Arc::new(WeekendCalendar),
        }
    }

    /// Replaces the conventions.
    #[must_use]
    pub fn with_conventions(mut self, conventions: CdsConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Replaces the business day calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.conventions.recovery_rate = recovery_rate;
        self
    }

    /// Trade date.
    pub fn trade_date(&self) -> Date {
        self.trade_date
    }

    /// Conventions in use.
    pub fn conventions(&self) -> &CdsConventions {
        &self.conventions
    }

    /// Step-in date: trade date plus the step-in calendar days.
    pub fn step_in_date(&self) -> Date {
        self.trade_date.add_days(i64::from(self.conventions.step_in_days))
    }

    /// Cash settle date: trade date plus the settlement business days.
    pub fn cash_settle_date(&self) -> Date {
        let days = i32::try_from(self.conventions.cash_settle_days).unwrap_or(i32::MAX);
        self.calendar.add_business_days(self.trade_date, days)
    }

    /// CDS accruing from `accrual_start` to `maturity`.
    pub fn build(&self, accrual_start: Date, maturity: Date) -> CreditResult<CdsAnalytic> {
        self.build_with_dates(
            self.step_in_date(),
            self.cash_settle_date(),
            accrual_start,
            maturity,
        )
    }

    /// CDSs sharing an accrual start.
    pub fn build_many(&self, accrual_start: Date, maturities: &[Date]) -> CreditResult<Vec<CdsAnalytic>> {
        maturities
            .iter()
            .map(|&maturity| self.build(accrual_start, maturity))
            .collect()
    }

    /// Standard CDS: accrual from the previous IMM date, business-day
    /// adjusted.
    pub fn standard(&self, maturity: Date) -> CreditResult<CdsAnalytic> {
        let imm = previous_imm_date(self.step_in_date())?;
        let accrual_start = self
            .calendar
            .adjust(imm, self.conventions.business_day_convention);
        self.build(accrual_start, maturity)
    }

    /// Standard CDS of a given tenor, maturing on an IMM date.
    pub fn standard_tenor(&self, tenor: Period) -> CreditResult<CdsAnalytic> {
        self.standard(standard_maturity(self.trade_date, tenor)?)
    }

    /// CDS with explicit step-in and cash settle dates.
    pub fn build_with_dates(
        &self,
        step_in: Date,
        cash_settle: Date,
        accrual_start: Date,
        maturity: Date,
    ) -> CreditResult<CdsAnalytic> {
        let conv = &self.conventions;
        check_recovery(conv.recovery_rate)?;
        conv.validate_or_error()?;

        let trade = self.trade_date;
        if step_in < trade {
            return Err(CreditError::invalid_instrument(format!(
                "step-in date {step_in} is before trade date {trade}"
            )));
        }
        if maturity <= step_in {
            return Err(CreditError::invalid_instrument(format!(
                "maturity {maturity} is not after step-in date {step_in}"
            )));
        }

        let schedule = PremiumLegSchedule::new(
            accrual_start,
            maturity,
            conv.payment_interval,
            conv.stub_type,
            conv.business_day_convention,
            self.calendar.as_ref(),
            conv.protection_start,
        )?
        .truncated(step_in);

        let Some(first) = schedule.periods().first() else {
            return Err(CreditError::invalid_instrument(format!(
                "no premium payments remain after step-in date {step_in}"
            )));
        };

        let curve = conv.curve_day_count;
        let first_start = first.accrual_start;
        let protection_from = if step_in > first_start { step_in } else { first_start };
        let protection_from = protection_from.add_days(-i64::from(conv.protection_start));
        let accrued_year_fraction = if first_start < step_in {
            conv.accrual_day_count.year_fraction(first_start, step_in)
        } else {
            0.0
        };

        let coupons = schedule
            .periods()
            .iter()
            .map(|p| CdsCoupon::new(trade, p, conv))
            .collect();

        Ok(CdsAnalytic {
            maturity,
            coupons,
            protection_start: curve.year_fraction(trade, protection_from),
            protection_end: curve.year_fraction(trade, maturity),
            valuation_time: curve.year_fraction(trade, cash_settle),
            accrued_year_fraction,
            lgd: 1.0 - conv.recovery_rate,
            pay_accrued_on_default: conv.pay_accrued_on_default,
            protection_from_start_of_day: conv.protection_start,
        })
    }
}
