//! Growth rules: how a principal grows over time
//!
//! Every growth pattern (compound, discount, tiered, loan, or a caller's own
//! closure) implements [`GrowthRule`]. `Amount` and `Accumulation` wrap a
//! rule and derive rates and discount factors from it.

use std::fmt;

use crate::error::{TvmError, TvmResult};
use crate::rates::Rate;

/// Valuation rule of a growth pattern
pub trait GrowthRule: fmt::Debug + Send + Sync {
    /// Value at time `t` of principal `k` invested at time 0
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64>;

    /// Value at time `t` of 1 unit invested at time 0
    fn accumulation(&self, t: f64) -> TvmResult<f64> {
        self.amount(1.0, t)
    }

    /// Whether the rule can value an arbitrary principal
    fn accepts_principal(&self) -> bool {
        true
    }

    /// Annual effective rate, if growth is level compound
    fn level_rate(&self) -> Option<f64> {
        None
    }
}

impl GrowthRule for Rate {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Rate::amount(self, k, t)
    }

    fn accumulation(&self, t: f64) -> TvmResult<f64> {
        Rate::accumulation(self, t)
    }

    fn level_rate(&self) -> Option<f64> {
        if self.is_level() {
            self.effective_annual().ok()
        } else {
            None
        }
    }
}

/// Caller-supplied amount function of principal and time
pub struct AmountFn<F> {
    func: F,
}

impl<F> AmountFn<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    /// Wrap a function called as `func(k, t)`
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> GrowthRule for AmountFn<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok((self.func)(k, t))
    }
}

impl<F> fmt::Debug for AmountFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AmountFn(k, t)")
    }
}

/// Caller-supplied accumulation function of time only.
///
/// It knows nothing about principal, so it can back an `Accumulation`
/// but not an `Amount`.
pub struct AccumulationFn<F> {
    func: F,
}

impl<F> AccumulationFn<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    /// Wrap a function called as `func(t)`
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> GrowthRule for AccumulationFn<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn amount(&self, _k: f64, _t: f64) -> TvmResult<f64> {
        Err(TvmError::validation(
            "growth function must take a parameter k for the principal",
        ))
    }

    fn accumulation(&self, t: f64) -> TvmResult<f64> {
        Ok((self.func)(t))
    }

    fn accepts_principal(&self) -> bool {
        false
    }
}

impl<F> fmt::Debug for AccumulationFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccumulationFn(t)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_fn() {
        let rule = AmountFn::new(|k, t| k * (1.0 + 0.05 * t));
        assert!((rule.amount(100.0, 2.0).unwrap() - 110.0).abs() < 1e-12);
        assert!((rule.accumulation(2.0).unwrap() - 1.1).abs() < 1e-12);
        assert!(rule.accepts_principal());
        assert!(rule.level_rate().is_none());
    }

    #[test]
    fn test_accumulation_fn_has_no_principal() {
        let rule = AccumulationFn::new(|t: f64| 1.0 + 0.05 * t * t);
        assert!(!rule.accepts_principal());
        assert!((rule.accumulation(2.0).unwrap() - 1.2).abs() < 1e-12);
        assert!(matches!(rule.amount(100.0, 2.0), Err(TvmError::Validation(_))));
    }

    #[test]
    fn test_rate_level_rate() {
        let level = Rate::effective(0.05).level_rate().unwrap();
        assert!((level - 0.05).abs() < 1e-15);
        assert_eq!(Rate::simple(0.05).level_rate(), None);
    }
}
