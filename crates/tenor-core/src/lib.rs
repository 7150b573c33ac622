//! # Tenor Core
//!
//! Date arithmetic and market conventions for the Tenor credit analytics library.
//!
//! This crate provides the pure-function building blocks consumed by the
//! curve builders and CDS analytics:
//!
//! - **Types**: [`Date`] and [`Period`] (tenors such as `3M`, `5Y`)
//! - **Day Count Conventions**: ACT/360, ACT/365F and 30/360 year fractions
//! - **Business Day Calendars**: weekend-only and holiday calendars
//! - **Business Day Conventions**: Following, Modified Following, Preceding
//!
//! ## Example
//!
//! ```rust
//! use tenor_core::prelude::*;
//!
//! let trade = Date::from_ymd(2013, 6, 4).unwrap();
//! let cash_settle = WeekendCalendar.add_business_days(trade, 3);
//! assert_eq!(cash_settle, Date::from_ymd(2013, 6, 7).unwrap());
//!
//! let yf = Act365Fixed.year_fraction(trade, cash_settle);
//! assert!((yf - 3.0 / 365.0).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention, Thirty360US};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Period, PeriodUnit};
    pub use crate::validation::{Validate, ValidationError};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Period};
