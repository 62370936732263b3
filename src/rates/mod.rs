//! Rates and day counts consumed by the growth and annuity modules

mod rate;
mod daycount;

pub use rate::{Rate, RatePattern};
pub use daycount::DayCount;
