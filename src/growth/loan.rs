//! Simple discounted loan
//!
//! A lump-sum loan repaid with a single payment at `term`. The borrower
//! receives the principal less a discount up front, so the loan only has
//! a value at origination and at maturity.

use serde::{Deserialize, Serialize};

use crate::error::{TvmError, TvmResult};
use crate::growth::rule::GrowthRule;

const TIME_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleLoan {
    principal: f64,
    term: f64,
    discount_amount: f64,
    discount_rate: f64,
}

impl SimpleLoan {
    /// Supply either the discount amount or the discount rate, not both
    pub fn new(
        principal: f64,
        term: f64,
        discount_amount: Option<f64>,
        discount_rate: Option<f64>,
    ) -> TvmResult<Self> {
        let (discount_amount, discount_rate) = match (discount_amount, discount_rate) {
            (Some(_), Some(_)) => {
                return Err(TvmError::config(
                    "supply a discount amount or a discount rate, not both",
                ))
            }
            (None, None) => {
                return Err(TvmError::config(
                    "either a discount amount or a discount rate is required",
                ))
            }
            (Some(amount), None) => {
                if principal == 0.0 {
                    return Err(TvmError::domain("principal must be non-zero"));
                }
                (amount, amount / principal)
            }
            (None, Some(rate)) => (principal * rate, rate),
        };

        Ok(Self {
            principal,
            term,
            discount_amount,
            discount_rate,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn term(&self) -> f64 {
        self.term
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Cash the borrower actually receives at origination
    pub fn amount_available(&self) -> f64 {
        self.principal - self.discount_amount
    }

    /// Effective interest earned by the lender over the term
    pub fn effective_interest(&self) -> f64 {
        self.discount_amount / self.amount_available()
    }
}

impl GrowthRule for SimpleLoan {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        if t.abs() < TIME_TOLERANCE {
            Ok(k - self.discount_amount)
        } else if (t - self.term).abs() < TIME_TOLERANCE {
            Ok(k)
        } else {
            Err(TvmError::domain(format!(
                "a simple loan has no value at time {}, only at 0 and {}",
                t, self.term
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::amount::{Amount, GrowthFunction};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loan_from_discount_rate() {
        let loan = SimpleLoan::new(1000.0, 1.0, None, Some(0.1)).unwrap();
        assert_abs_diff_eq!(loan.discount_amount(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.amount_available(), 900.0, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.effective_interest(), 1.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_loan_from_discount_amount() {
        let loan = SimpleLoan::new(2000.0, 2.0, Some(150.0), None).unwrap();
        assert_abs_diff_eq!(loan.discount_rate(), 0.075, epsilon = 1e-12);

        let amt = Amount::new(loan, 2000.0).unwrap();
        assert_abs_diff_eq!(amt.value_at(0.0).unwrap(), 1850.0, epsilon = 1e-9);
        assert_abs_diff_eq!(amt.value_at(2.0).unwrap(), 2000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(amt.interest_earned(0.0, 2.0).unwrap(), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_loan_undefined_between_dates() {
        let loan = SimpleLoan::new(1000.0, 1.0, None, Some(0.1)).unwrap();
        assert!(matches!(loan.amount(1000.0, 0.5), Err(TvmError::Domain(_))));
        assert!(matches!(loan.amount(1000.0, 2.0), Err(TvmError::Domain(_))));
    }

    #[test]
    fn test_loan_requires_exactly_one_discount() {
        assert!(matches!(
            SimpleLoan::new(1000.0, 1.0, Some(100.0), Some(0.1)),
            Err(TvmError::Config(_))
        ));
        assert!(matches!(
            SimpleLoan::new(1000.0, 1.0, None, None),
            Err(TvmError::Config(_))
        ));
    }
}
