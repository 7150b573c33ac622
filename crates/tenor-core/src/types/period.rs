//! Tenors such as `1M`, `6M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    /// Calendar days.
    Days,
    /// Weeks of seven calendar days.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl PeriodUnit {
    fn suffix(self) -> char {
        match self {
            PeriodUnit::Days => 'D',
            PeriodUnit::Weeks => 'W',
            PeriodUnit::Months => 'M',
            PeriodUnit::Years => 'Y',
        }
    }
}

/// A signed calendar period.
///
/// Serializes as its market string form (`"3M"`, `"-1D"`), so tenors read
/// naturally in TOML and JSON configuration.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::{Date, Period};
///
/// let spot = Date::from_ymd(2013, 6, 6).unwrap();
/// let tenor: Period = "2Y".parse().unwrap();
/// assert_eq!(spot.add_period(tenor).unwrap(), Date::from_ymd(2015, 6, 6).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    amount: i32,
    unit: PeriodUnit,
}

impl Period {
    /// Creates a period of `amount` units.
    #[must_use]
    pub const fn new(amount: i32, unit: PeriodUnit) -> Self {
        Self { amount, unit }
    }

    /// A period of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, PeriodUnit::Days)
    }

    /// A period of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, PeriodUnit::Weeks)
    }

    /// A period of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, PeriodUnit::Months)
    }

    /// A period of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, PeriodUnit::Years)
    }

    /// Number of units.
    #[must_use]
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// The unit.
    #[must_use]
    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// True for a zero-length period.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Returns this period scaled by `factor`, e.g. `3M * 4 = 12M`.
    ///
    /// Schedules step by `end - k * interval` rather than repeatedly
    /// subtracting `interval`, which keeps end-of-month clipping from drifting.
    #[must_use]
    pub fn times(&self, factor: i32) -> Self {
        Self::new(self.amount * factor, self.unit)
    }

    /// Returns the negated period.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(-self.amount, self.unit)
    }

    /// Shifts `date` by this period.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            PeriodUnit::Days => Ok(date.add_days(i64::from(self.amount))),
            PeriodUnit::Weeks => Ok(date.add_days(7 * i64::from(self.amount))),
            PeriodUnit::Months => date.add_months(self.amount),
            PeriodUnit::Years => date.add_years(self.amount),
        }
    }

    /// Approximate length in years, used only for ordering and sanity checks.
    #[must_use]
    pub fn approx_years(&self) -> f64 {
        let n = f64::from(self.amount);
        match self.unit {
            PeriodUnit::Days => n / 365.0,
            PeriodUnit::Weeks => 7.0 * n / 365.0,
            PeriodUnit::Months => n / 12.0,
            PeriodUnit::Years => n,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let Some(last) = text.chars().last() else {
            return Err(CoreError::invalid_period(s, "empty tenor"));
        };
        let unit = match last.to_ascii_uppercase() {
            'D' => PeriodUnit::Days,
            'W' => PeriodUnit::Weeks,
            'M' => PeriodUnit::Months,
            'Y' => PeriodUnit::Years,
            _ => return Err(CoreError::invalid_period(s, "unit must be one of D, W, M, Y")),
        };
        let amount = text[..text.len() - last.len_utf8()]
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_period(s, "amount is not an integer"))?;

        Ok(Self::new(amount, unit))
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
