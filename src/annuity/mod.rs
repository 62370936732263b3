//! Annuity valuation and loan payment derivation
//!
//! - [`Annuity`]: level, perpetual and scheduled payment streams with
//!   present and accumulated values
//! - Loan functions: payment from loan amount, savings payment from a
//!   target, number of deposits, outstanding balances
//! - [`rounding`]: cents rounding used to reconcile payments

#[allow(clippy::module_inception)]
mod annuity;
mod loan;
pub mod rounding;

pub use annuity::{Annuity, PaymentAmount, Timing};
pub use loan::{
    loan_amount_from_payment, number_of_payments, outstanding_loan_balance_prospective,
    outstanding_loan_balance_retrospective, payment_from_loan_amount,
    savings_payment_from_future_value, Installments, LoanPayment,
};
