//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// How to roll a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Keep the date even if it is not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Following, unless that crosses into the next month, in which case preceding.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Preceding, unless that crosses into the previous month, in which case following.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
            "unadjusted" | "none" => Ok(Self::Unadjusted),
            "following" | "f" => Ok(Self::Following),
            "modifiedfollowing" | "mf" => Ok(Self::ModifiedFollowing),
            "preceding" | "p" => Ok(Self::Preceding),
            "modifiedpreceding" | "mp" => Ok(Self::ModifiedPreceding),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following() {
        // 2014-09-20 is a Saturday, IMM date rolls to Monday
        let adjusted = WeekendCalendar.adjust(d(2014, 9, 20), BusinessDayConvention::Following);
        assert_eq!(adjusted, d(2014, 9, 22));
    }

    #[test]
    fn test_modified_following_month_end() {
        // 2013-08-31 is a Saturday; following would cross into September
        let cal = WeekendCalendar;
        assert_eq!(
            cal.adjust(d(2013, 8, 31), BusinessDayConvention::ModifiedFollowing),
            d(2013, 8, 30)
        );
        assert_eq!(cal.adjust(d(2013, 8, 31), BusinessDayConvention::Following), d(2013, 9, 2));
    }

    #[test]
    fn test_preceding_variants() {
        let cal = WeekendCalendar;
        // 2013-06-01 is a Saturday; preceding would cross into May
        assert_eq!(cal.adjust(d(2013, 6, 1), BusinessDayConvention::Preceding), d(2013, 5, 31));
        assert_eq!(
            cal.adjust(d(2013, 6, 1), BusinessDayConvention::ModifiedPreceding),
            d(2013, 6, 3)
        );
    }

    #[test]
    fn test_unadjusted_and_business_day() {
        let cal = WeekendCalendar;
        let saturday = d(2013, 6, 8);
        assert_eq!(cal.adjust(saturday, BusinessDayConvention::Unadjusted), saturday);

        let friday = d(2013, 6, 7);
        assert_eq!(cal.adjust(friday, BusinessDayConvention::ModifiedFollowing), friday);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("nearest".parse::<BusinessDayConvention>().is_err());
    }
}
