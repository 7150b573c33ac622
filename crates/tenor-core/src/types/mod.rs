//! Domain types.

mod date;
mod period;

pub use date::Date;
pub use period::{Period, PeriodUnit};
