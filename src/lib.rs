//! Interest Theory - time value of money calculations
//!
//! This library provides:
//! - Interest and discount rates in every common quoting convention
//! - Growth functions (simple, compound, discount, tiered, custom)
//! - Algebraic solvers for simple and compound interest
//! - Annuities and perpetuities, immediate and due
//! - Loan and savings payments reconciled to the cent
//! - Outstanding loan balances, retrospective and prospective

pub mod error;
pub mod rates;
pub mod growth;
pub mod cashflow;
pub mod annuity;

// Re-export commonly used types
pub use error::{TvmError, TvmResult};
pub use rates::{DayCount, Rate, RatePattern};
pub use growth::{Accumulation, Amount, GrowthFunction, GrowthRule};
pub use cashflow::Payments;
pub use annuity::{Annuity, LoanPayment, Timing};
