//! Amount and accumulation functions
//!
//! An [`Amount`] values a specific principal `k` over time; an
//! [`Accumulation`] is the special case `k = 1` and describes a growth
//! factor. Both derive interest earned, effective interest and discount
//! rates over intervals from their underlying [`GrowthRule`].

use std::fmt;
use std::sync::Arc;

use crate::error::{check_interval, check_time, TvmError, TvmResult};
use crate::growth::rule::{AccumulationFn, AmountFn, GrowthRule};
use crate::rates::Rate;

/// Shared behaviour of amount and accumulation functions
pub trait GrowthFunction {
    /// Value at time `t >= 0`
    fn value_at(&self, t: f64) -> TvmResult<f64>;

    /// Interest earned between `t1` and `t2`
    fn interest_earned(&self, t1: f64, t2: f64) -> TvmResult<f64> {
        check_interval(t1, t2)?;
        Ok(self.value_at(t2)? - self.value_at(t1)?)
    }

    /// Effective interest rate over `[t1, t2]`, optionally annualized
    fn effective_rate_over(&self, t1: f64, t2: f64, annualize: bool) -> TvmResult<Rate> {
        check_interval(t1, t2)?;
        let start = self.value_at(t1)?;
        let end = self.value_at(t2)?;
        let rate = Rate::effective_over((end - start) / start, t2 - t1);

        if annualize {
            rate.standardize()
        } else {
            Ok(rate)
        }
    }

    /// Effective discount rate over `[t1, t2]`
    fn effective_discount_over(&self, t1: f64, t2: f64) -> TvmResult<f64> {
        check_interval(t1, t2)?;
        let start = self.value_at(t1)?;
        let end = self.value_at(t2)?;
        Ok((end - start) / end)
    }

    /// Effective interest rate for the n-th period, `[n-1, n]`
    fn nth_period_effective_rate(&self, n: u32) -> TvmResult<Rate> {
        let (t1, t2) = nth_period(n)?;
        self.effective_rate_over(t1, t2, false)
    }

    /// Effective discount rate for the n-th period, `[n-1, n]`
    fn nth_period_effective_discount(&self, n: u32) -> TvmResult<f64> {
        let (t1, t2) = nth_period(n)?;
        self.effective_discount_over(t1, t2)
    }
}

fn nth_period(n: u32) -> TvmResult<(f64, f64)> {
    if n == 0 {
        return Err(TvmError::domain("periods are numbered from 1"));
    }
    Ok(((n - 1) as f64, n as f64))
}

/// Amount function: value over time of a principal `k`
#[derive(Clone)]
pub struct Amount {
    rule: Arc<dyn GrowthRule>,
    k: f64,
}

impl Amount {
    /// Create an amount function from a growth rule and principal.
    ///
    /// Fails if the rule cannot take a principal.
    pub fn new(rule: impl GrowthRule + 'static, k: f64) -> TvmResult<Self> {
        Self::from_shared(Arc::new(rule), k)
    }

    /// Create an amount function from an already shared rule
    pub fn from_shared(rule: Arc<dyn GrowthRule>, k: f64) -> TvmResult<Self> {
        if !rule.accepts_principal() {
            return Err(TvmError::validation(
                "growth function must take a parameter k for the principal",
            ));
        }
        Ok(Self { rule, k })
    }

    /// Amount function from a closure called as `func(k, t)`
    pub fn from_fn<F>(func: F, k: f64) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            rule: Arc::new(AmountFn::new(func)),
            k,
        }
    }

    /// Principal invested at time 0
    pub fn principal(&self) -> f64 {
        self.k
    }

    /// Underlying growth rule
    pub fn rule(&self) -> &dyn GrowthRule {
        self.rule.as_ref()
    }

    /// The accumulation function (`k = 1`) sharing this amount's rule
    pub fn accumulation(&self) -> Accumulation {
        Accumulation {
            rule: Arc::clone(&self.rule),
        }
    }

    /// Whether the underlying rule is a level compound rate
    pub fn is_level(&self) -> bool {
        self.rule.level_rate().is_some()
    }

    /// Annual effective rate of a level rule
    pub fn interest_rate(&self) -> Option<f64> {
        self.rule.level_rate()
    }
}

impl GrowthFunction for Amount {
    fn value_at(&self, t: f64) -> TvmResult<f64> {
        check_time(t)?;
        self.rule.amount(self.k, t)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Amount")
            .field("k", &self.k)
            .field("rule", &self.rule)
            .finish()
    }
}

/// Accumulation function: growth of 1 unit over time
#[derive(Clone)]
pub struct Accumulation {
    rule: Arc<dyn GrowthRule>,
}

impl Accumulation {
    /// Create an accumulation function from any growth rule
    pub fn new(rule: impl GrowthRule + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Create an accumulation function from an already shared rule
    pub fn from_shared(rule: Arc<dyn GrowthRule>) -> Self {
        Self { rule }
    }

    /// Accumulation function from a closure called as `func(t)`
    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(AccumulationFn::new(func))
    }

    /// Underlying growth rule
    pub fn rule(&self) -> &dyn GrowthRule {
        self.rule.as_ref()
    }

    /// Whether the underlying rule is a level compound rate
    pub fn is_level(&self) -> bool {
        self.rule.level_rate().is_some()
    }

    /// Annual effective rate of a level rule
    pub fn interest_rate(&self) -> Option<f64> {
        self.rule.level_rate()
    }

    /// Discount factor at `t` applied to `future_value`
    pub fn discount_factor(&self, t: f64, future_value: f64) -> TvmResult<f64> {
        Ok(future_value / self.value_at(t)?)
    }

    /// Principal needed at `t1` to reach `fv` at `t2`
    pub fn principal_for_future_value(&self, fv: f64, t1: f64, t2: f64) -> TvmResult<f64> {
        Ok(fv * self.discount_factor(t2, 1.0)? * self.value_at(t1)?)
    }
}

impl GrowthFunction for Accumulation {
    fn value_at(&self, t: f64) -> TvmResult<f64> {
        check_time(t)?;
        self.rule.accumulation(t)
    }
}

impl fmt::Debug for Accumulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulation")
            .field("rule", &self.rule)
            .finish()
    }
}

impl From<Rate> for Accumulation {
    fn from(rate: Rate) -> Self {
        Accumulation::new(rate)
    }
}

impl From<f64> for Accumulation {
    fn from(rate: f64) -> Self {
        Accumulation::new(Rate::effective(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn simple_amount() -> Amount {
        // 5% simple interest
        Amount::from_fn(|k, t| k * (1.0 + 0.05 * t), 1000.0)
    }

    #[test]
    fn test_value_and_interest_earned() {
        let amt = simple_amount();
        assert_abs_diff_eq!(amt.value_at(2.0).unwrap(), 1100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(amt.interest_earned(1.0, 3.0).unwrap(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_earned_rejects_bad_intervals() {
        let amt = simple_amount();
        assert!(matches!(amt.interest_earned(3.0, 1.0), Err(TvmError::Domain(_))));
        assert!(matches!(amt.interest_earned(-1.0, 1.0), Err(TvmError::Domain(_))));
        assert!(matches!(amt.value_at(-0.5), Err(TvmError::Domain(_))));
    }

    #[test]
    fn test_effective_rates_under_simple_interest() {
        let amt = simple_amount();

        // Simple interest: the effective rate declines every period
        let first = amt.nth_period_effective_rate(1).unwrap();
        let fifth = amt.nth_period_effective_rate(5).unwrap();
        assert_abs_diff_eq!(first.rate, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(fifth.rate, 0.05 / 1.2, epsilon = 1e-12);
        assert!(fifth.rate < first.rate);

        let d1 = amt.nth_period_effective_discount(1).unwrap();
        assert_abs_diff_eq!(d1, 0.05 / 1.05, epsilon = 1e-12);

        assert!(matches!(amt.nth_period_effective_rate(0), Err(TvmError::Domain(_))));
    }

    #[test]
    fn test_annualized_rate() {
        let acc = Accumulation::from(0.05);
        let two_year = acc.effective_rate_over(1.0, 3.0, false).unwrap();
        assert_abs_diff_eq!(two_year.rate, 1.05_f64.powi(2) - 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(two_year.interval, 2.0, epsilon = 1e-12);

        let annual = acc.effective_rate_over(1.0, 3.0, true).unwrap();
        assert_abs_diff_eq!(annual.rate, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(annual.interval, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_amount_requires_principal() {
        let result = Amount::new(AccumulationFn::new(|t: f64| 1.05_f64.powf(t)), 100.0);
        assert!(matches!(result, Err(TvmError::Validation(_))));

        // The same rule is fine as an accumulation function
        let acc = Accumulation::from_fn(|t: f64| 1.05_f64.powf(t));
        assert_abs_diff_eq!(acc.value_at(1.0).unwrap(), 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_extract_accumulation() {
        let amt = simple_amount();
        let acc = amt.accumulation();
        assert_abs_diff_eq!(acc.value_at(2.0).unwrap(), 1.1, epsilon = 1e-12);
        assert!(!acc.is_level());
    }

    #[test]
    fn test_discount_factor_and_future_principal() {
        let acc = Accumulation::from(0.05);
        assert_abs_diff_eq!(acc.discount_factor(1.0, 1.0).unwrap(), 1.0 / 1.05, epsilon = 1e-12);
        assert_abs_diff_eq!(acc.discount_factor(2.0, 1102.5).unwrap(), 1000.0, epsilon = 1e-9);

        // Needed at t=2 to have 1000 at t=5: 1000 / 1.05^3
        let needed = acc.principal_for_future_value(1000.0, 2.0, 5.0).unwrap();
        assert_abs_diff_eq!(needed, 1000.0 / 1.05_f64.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_level_rate_exposed() {
        let acc = Accumulation::from(Rate::nominal(0.06, 2.0));
        assert!(acc.is_level());
        assert_abs_diff_eq!(acc.interest_rate().unwrap(), 0.0609, epsilon = 1e-12);
    }
}
