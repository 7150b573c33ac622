//! Actual/360 day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/360.
///
/// Actual calendar days over a 360-day year. ISDA CDS premium accrual and
/// money-market deposits in the yield curve bootstrap both use it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
