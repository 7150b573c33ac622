//! IMM roll dates for standard CDS contracts.
//!
//! Standard CDS mature and accrue from the 20th of March, June, September
//! and December.

use tenor_core::types::{Date, Period};

use crate::error::CreditResult;

/// Day of month of every IMM date.
const IMM_DAY: u32 = 20;

/// Returns true if `date` is the 20th of an IMM month.
pub fn is_imm_date(date: Date) -> bool {
    date.day() == IMM_DAY && date.month() % 3 == 0
}

/// First IMM date strictly after `date`.
pub fn next_imm_date(date: Date) -> CreditResult<Date> {
    let (year, month) = (date.year(), date.month());
    let quarter_month = month.div_ceil(3) * 3;
    let candidate = Date::from_ymd(year, quarter_month, IMM_DAY)?;
    if candidate > date {
        return Ok(candidate);
    }
    if quarter_month == 12 {
        Ok(Date::from_ymd(year + 1, 3, IMM_DAY)?)
    } else {
        Ok(Date::from_ymd(year, quarter_month + 3, IMM_DAY)?)
    }
}

/// Last IMM date strictly before `date`.
pub fn previous_imm_date(date: Date) -> CreditResult<Date> {
    let (year, month) = (date.year(), date.month());
    let quarter_month = month / 3 * 3;
    if quarter_month > 0 {
        let candidate = Date::from_ymd(year, quarter_month, IMM_DAY)?;
        if candidate < date {
            return Ok(candidate);
        }
    }
    let (year, month) = match quarter_month {
        0 | 3 => (year - 1, 12),
        m => (year, m - 3),
    };
    Ok(Date::from_ymd(year, month, IMM_DAY)?)
}

/// The `count` IMM dates following `date`.
pub fn imm_dates_from(date: Date, count: usize) -> CreditResult<Vec<Date>> {
    let mut dates = Vec::with_capacity(count);
    let mut current = date;
    for _ in 0..count {
        current = next_imm_date(current)?;
        dates.push(current);
    }
    Ok(dates)
}

/// Maturity of a standard CDS of the given tenor traded on `trade_date`:
/// the next IMM date after the trade date, rolled forward by the tenor.
pub fn standard_maturity(trade_date: Date, tenor: Period) -> CreditResult<Date> {
    Ok(next_imm_date(trade_date)?.add_period(tenor)?)
}
