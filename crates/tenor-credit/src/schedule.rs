//! ISDA premium leg schedules.

use serde::{Deserialize, Serialize};

use tenor_core::calendars::{BusinessDayConvention, Calendar};
use tenor_core::types::{Date, Period};

use crate::error::{CreditError, CreditResult};

/// Placement and length of the irregular period of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StubType {
    /// Short first period; dates roll backward from maturity.
    #[default]
    FrontShort,
    /// First period merged with the stub; dates roll backward from maturity.
    FrontLong,
    /// Short last period; dates roll forward from the accrual start.
    BackShort,
    /// Last period merged with the stub; dates roll forward from the accrual start.
    BackLong,
}

impl std::fmt::Display for StubType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StubType::FrontShort => "Front Short",
            StubType::FrontLong => "Front Long",
            StubType::BackShort => "Back Short",
            StubType::BackLong => "Back Long",
        };
        write!(f, "{name}")
    }
}

/// One accrual period and its payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    /// Start of accrual.
    pub accrual_start: Date,
    /// End of accrual.
    pub accrual_end: Date,
    /// Payment date.
    pub payment: Date,
}

/// Accrual periods of a CDS premium leg.
///
/// The first accrual start is the unadjusted start date and interior dates
/// are business-day adjusted. The final period accrues to the unadjusted
/// maturity, one day further when protection runs from the start of day, and
/// pays on the adjusted maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumLegSchedule {
    periods: Vec<AccrualPeriod>,
}

impl PremiumLegSchedule {
    /// Generates the schedule from `start` to `end`.
    pub fn new<C: Calendar + ?Sized>(
        start: Date,
        end: Date,
        interval: Period,
        stub: StubType,
        convention: BusinessDayConvention,
        calendar: &C,
        protection_start: bool,
    ) -> CreditResult<Self> {
        let dates = Self::unadjusted_dates(start, end, interval, stub)?;
        let n = dates.len() - 1;

        let adjusted: Vec<Date> = dates
            .iter()
            .map(|&d| calendar.adjust(d, convention))
            .collect();

        let periods = (0..n)
            .map(|i| {
                let accrual_start = if i == 0 { dates[0] } else { adjusted[i] };
                let accrual_end = if i + 1 == n {
                    if protection_start {
                        dates[n].add_days(1)
                    } else {
                        dates[n]
                    }
                } else {
                    adjusted[i + 1]
                };
                AccrualPeriod {
                    accrual_start,
                    accrual_end,
                    payment: adjusted[i + 1],
                }
            })
            .collect();

        Ok(Self { periods })
    }

    /// Unadjusted schedule dates, including `start` and `end`.
    ///
    /// Every date is `end − k·interval` (or `start + k·interval`), so month
    /// end clipping never accumulates.
    pub fn unadjusted_dates(
        start: Date,
        end: Date,
        interval: Period,
        stub: StubType,
    ) -> CreditResult<Vec<Date>> {
        if end <= start {
            return Err(CreditError::invalid_instrument(format!(
                "schedule end {end} is not after start {start}"
            )));
        }
        if interval.amount() <= 0 {
            return Err(CreditError::invalid_instrument(format!(
                "payment interval {interval} must be positive"
            )));
        }

        match stub {
            StubType::FrontShort | StubType::FrontLong => {
                let mut dates = vec![end];
                let mut k = 1;
                let on_grid = loop {
                    let date = interval.times(-k).add_to(end)?;
                    if date <= start {
                        break date == start;
                    }
                    dates.push(date);
                    k += 1;
                };
                dates.push(start);
                dates.reverse();
                if stub == StubType::FrontLong && !on_grid && dates.len() > 2 {
                    dates.remove(1);
                }
                Ok(dates)
            }
            StubType::BackShort | StubType::BackLong => {
                let mut dates = vec![start];
                let mut k = 1;
                let on_grid = loop {
                    let date = interval.times(k).add_to(start)?;
                    if date >= end {
                        break date == end;
                    }
                    dates.push(date);
                    k += 1;
                };
                dates.push(end);
                if stub == StubType::BackLong && !on_grid && dates.len() > 2 {
                    dates.remove(dates.len() - 2);
                }
                Ok(dates)
            }
        }
    }

    /// Drops the periods whose accrual ends on or before `step_in`.
    #[must_use]
    pub fn truncated(&self, step_in: Date) -> Self {
        Self {
            periods: self
                .periods
                .iter()
                .filter(|p| p.accrual_end > step_in)
                .copied()
                .collect(),
        }
    }

    /// The accrual periods in date order.
    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// True if no payments remain.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
