//! Day count conventions.
//!
//! A day count turns a pair of dates into a year fraction. The ISDA CDS
//! standard model uses three of them:
//!
//! - [`Act360`]: premium accrual and money-market deposits
//! - [`Act365Fixed`]: curve time (every curve node and cashflow time)
//! - [`Thirty360`]: fixed swap legs in the yield curve bootstrap
//!
//! [`Thirty360US`] and [`Thirty360E`] are provided for non-ISDA curves.
//!
//! Year fractions are signed: a start after the end yields a negative
//! fraction, which the CDS schedule relies on for accrual periods that
//! began before the trade date.
//!
//! # Usage
//!
//! ```rust
//! use tenor_core::daycounts::{DayCount, Act360, Act365Fixed};
//! use tenor_core::types::Date;
//!
//! let start = Date::from_ymd(2013, 3, 20).unwrap();
//! let end = Date::from_ymd(2013, 6, 21).unwrap();
//!
//! assert_eq!(Act360.day_count(start, end), 93);
//! let ratio = Act360.year_fraction(start, end) / Act365Fixed.year_fraction(start, end);
//! assert!((ratio - 365.0 / 360.0).abs() < 1e-15);
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::{Thirty360, Thirty360E, Thirty360US};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so that schedules can
/// be built from worker threads.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Signed year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Signed day count between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime selectable day count convention.
///
/// Serializes as the market name, e.g. `"ACT/365F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    #[serde(rename = "ACT/360")]
    Act360,

    /// Actual/365 Fixed.
    #[default]
    #[serde(rename = "ACT/365F")]
    Act365Fixed,

    /// 30/360 bond basis as used by ISDA fixed legs.
    #[serde(rename = "30/360")]
    Thirty360,

    /// 30/360 US with February end-of-month rules.
    #[serde(rename = "30/360 US")]
    Thirty360US,

    /// 30E/360 Eurobond basis.
    #[serde(rename = "30E/360")]
    Thirty360E,
}

impl DayCountConvention {
    /// Signed year fraction between two dates.
    #[must_use]
    pub fn year_fraction(self, start: Date, end: Date) -> f64 {
        match self {
            Self::Act360 => Act360.year_fraction(start, end),
            Self::Act365Fixed => Act365Fixed.year_fraction(start, end),
            Self::Thirty360 => Thirty360.year_fraction(start, end),
            Self::Thirty360US => Thirty360US.year_fraction(start, end),
            Self::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }

    /// Returns the convention as a boxed trait object.
    #[must_use]
    pub fn to_day_count(self) -> Box<dyn DayCount> {
        match self {
            Self::Act360 => Box::new(Act360),
            Self::Act365Fixed => Box::new(Act365Fixed),
            Self::Thirty360 => Box::new(Thirty360),
            Self::Thirty360US => Box::new(Thirty360US),
            Self::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Market name of the convention.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Act360 => Act360.name(),
            Self::Act365Fixed => Act365Fixed.name(),
            Self::Thirty360 => Thirty360.name(),
            Self::Thirty360US => Thirty360US.name(),
            Self::Thirty360E => Thirty360E.name(),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(' ', "").as_str() {
            "ACT/360" | "ACTUAL/360" | "A360" => Ok(Self::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365FIXED" | "A365F" => Ok(Self::Act365Fixed),
            "30/360" | "30/360ISDA" | "BONDBASIS" => Ok(Self::Thirty360),
            "30/360US" | "30U/360" => Ok(Self::Thirty360US),
            "30E/360" | "EUROBONDBASIS" => Ok(Self::Thirty360E),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}
