//! Business day calendars and conventions.
//!
//! The ISDA standard model only needs weekend handling, but schedules accept
//! any [`Calendar`] so regional holidays can be layered in with
//! [`HolidayCalendar`].

mod conventions;

pub use conventions::BusinessDayConvention;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// Zero returns the date unchanged even if it is a holiday.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days in `(start, end]`.
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// Monday to Friday calendar with no holidays.
///
/// This is the calendar of the ISDA standard model reference runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekend calendar with an explicit holiday list.
///
/// Typically deserialized from configuration:
///
/// ```rust
/// use tenor_core::calendars::{Calendar, HolidayCalendar};
/// use tenor_core::types::Date;
///
/// let cal = HolidayCalendar::new("USNY", [Date::from_ymd(2013, 7, 4).unwrap()]);
/// assert!(!cal.is_business_day(Date::from_ymd(2013, 7, 4).unwrap()));
/// assert!(cal.is_business_day(Date::from_ymd(2013, 7, 5).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    #[serde(default)]
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a set of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Adds a holiday.
    #[must_use]
    pub fn with_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Number of holidays on the calendar.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
