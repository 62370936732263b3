//! Tiered growth patterns
//!
//! - [`TieredBalance`]: the rate depends on the current balance
//!   (e.g. 1% on the first $1000, 2% up to $5000, 3% above)
//! - [`TieredTime`]: the rate depends on how long the account has been open
//!   (e.g. 1% in year 1, 2% in year 2, 3% afterward)
//!
//! Tiers are lower bounds, ascending, paired one-to-one with rates.

use log::trace;

use crate::error::{TvmError, TvmResult};
use crate::growth::rule::GrowthRule;
use crate::growth::solvers::{compound_interest_solver, Solved};
use crate::rates::Rate;

fn validate_tiers(tiers: &[f64], n_rates: usize) -> TvmResult<()> {
    if tiers.is_empty() {
        return Err(TvmError::config("at least one tier is required"));
    }
    if tiers.len() != n_rates {
        return Err(TvmError::config(format!(
            "{} tiers supplied with {} rates",
            tiers.len(),
            n_rates
        )));
    }
    if tiers.windows(2).any(|w| w[1] <= w[0]) {
        return Err(TvmError::config("tiers must be strictly ascending"));
    }
    Ok(())
}

/// Balance-tiered account
#[derive(Debug, Clone, PartialEq)]
pub struct TieredBalance {
    tiers: Vec<f64>,
    /// Annual effective rate per tier
    rates: Vec<f64>,
}

impl TieredBalance {
    /// Create from balance lower bounds and their compound rates
    pub fn new<R: Into<Rate>>(
        tiers: Vec<f64>,
        rates: impl IntoIterator<Item = R>,
    ) -> TvmResult<Self> {
        let rates = rates
            .into_iter()
            .map(|r| r.into().effective_annual())
            .collect::<TvmResult<Vec<f64>>>()?;
        validate_tiers(&tiers, rates.len())?;
        Ok(Self { tiers, rates })
    }

    pub fn tiers(&self) -> &[f64] {
        &self.tiers
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Index of the tier an initial investment `k` starts in
    fn starting_tier(&self, k: f64) -> usize {
        self.tiers.iter().filter(|&&b| b <= k).count().saturating_sub(1)
    }

    /// Times at which an initial investment `k`, left untouched, crosses
    /// into each higher tier.
    ///
    /// A tier whose rate is zero or negative is never left, so no jump
    /// times follow it.
    pub fn jump_times(&self, k: f64) -> TvmResult<Vec<f64>> {
        let start = self.starting_tier(k);

        // The rate in force while growing towards each jump balance is the
        // rate of the tier just below it
        let jump_balances = &self.tiers[start + 1..];
        let jump_rates = &self.rates[start..];

        let mut times = Vec::with_capacity(jump_balances.len());
        let mut pv = k;
        let mut t_base = 0.0;
        for (&fv, &i) in jump_balances.iter().zip(jump_rates) {
            if i <= 0.0 {
                trace!("tier at rate {} never reaches balance {}", i, fv);
                break;
            }
            let solved =
                compound_interest_solver(Some(pv), Some(fv), None, Some(Rate::effective(i)))?;
            let increment = match solved {
                Solved::Time(t) => t,
                other => {
                    return Err(TvmError::domain(format!(
                        "expected a time from the compound solver, got {:?}",
                        other
                    )))
                }
            };
            t_base += increment;
            times.push(t_base);
            pv = fv;
        }

        trace!("tier jump times for principal {}: {:?}", k, times);
        Ok(times)
    }
}

impl GrowthRule for TieredBalance {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        if t < 0.0 {
            return Err(TvmError::domain(format!("time must be non-negative, got {}", t)));
        }

        let start = self.starting_tier(k);
        let mut starts = vec![0.0];
        starts.extend(self.jump_times(k)?);

        // Right-continuous: a tier is active from its start time onwards
        let index = starts.iter().filter(|&&s| s <= t).count() - 1;
        let tier = start + index;
        let base = if index == 0 { k } else { self.tiers[tier] };

        Ok(base * (1.0 + self.rates[tier]).powf(t - starts[index]))
    }
}

/// Time-tiered account
#[derive(Debug, Clone, PartialEq)]
pub struct TieredTime {
    tiers: Vec<f64>,
    rates: Vec<Rate>,
}

impl TieredTime {
    /// Create from time lower bounds and the rate in force from each
    pub fn new<R: Into<Rate>>(
        tiers: Vec<f64>,
        rates: impl IntoIterator<Item = R>,
    ) -> TvmResult<Self> {
        let rates: Vec<Rate> = rates.into_iter().map(Into::into).collect();
        validate_tiers(&tiers, rates.len())?;
        Ok(Self { tiers, rates })
    }

    pub fn tiers(&self) -> &[f64] {
        &self.tiers
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }
}

impl GrowthRule for TieredTime {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        let mut bounds: Vec<f64> = self.tiers.iter().copied().filter(|&s| s < t).collect();
        let rates = &self.rates[..bounds.len()];
        bounds.push(t);

        let mut balance = k;
        for (rate, window) in rates.iter().zip(bounds.windows(2)) {
            balance *= rate.accumulation(window[1] - window[0])?;
        }
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::amount::{Accumulation, Amount, GrowthFunction};
    use approx::assert_abs_diff_eq;

    fn balance_tiers() -> TieredBalance {
        TieredBalance::new(vec![0.0, 1000.0, 5000.0], vec![0.05, 0.10, 0.15]).unwrap()
    }

    #[test]
    fn test_jump_times() {
        let tb = balance_tiers();
        let jumps = tb.jump_times(800.0).unwrap();
        assert_eq!(jumps.len(), 2);

        let first = (1000.0_f64 / 800.0).ln() / 1.05_f64.ln();
        let second = first + 5.0_f64.ln() / 1.10_f64.ln();
        assert_abs_diff_eq!(jumps[0], first, epsilon = 1e-9);
        assert_abs_diff_eq!(jumps[1], second, epsilon = 1e-9);

        // Already in the top tier
        assert!(tb.jump_times(6000.0).unwrap().is_empty());
    }

    #[test]
    fn test_tiered_balance_values() {
        let tb = balance_tiers();
        let jumps = tb.jump_times(800.0).unwrap();

        assert_abs_diff_eq!(tb.amount(800.0, 0.0).unwrap(), 800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tb.amount(800.0, 2.0).unwrap(), 800.0 * 1.05_f64.powi(2), epsilon = 1e-9);

        let t = jumps[0] + 3.0;
        assert_abs_diff_eq!(tb.amount(800.0, t).unwrap(), 1000.0 * 1.10_f64.powi(3), epsilon = 1e-9);

        let t = jumps[1] + 1.0;
        assert_abs_diff_eq!(tb.amount(800.0, t).unwrap(), 5000.0 * 1.15, epsilon = 1e-9);
    }

    #[test]
    fn test_tiered_balance_starting_mid_tier() {
        let tb = balance_tiers();
        // 2000 sits in the 10% tier from the start
        assert_abs_diff_eq!(tb.amount(2000.0, 1.0).unwrap(), 2200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tb.amount(7000.0, 1.0).unwrap(), 7000.0 * 1.15, epsilon = 1e-9);
    }

    #[test]
    fn test_tiered_balance_is_continuous_at_jumps() {
        let tb = balance_tiers();
        for &jump in &tb.jump_times(800.0).unwrap() {
            let before = tb.amount(800.0, jump - 1e-9).unwrap();
            let after = tb.amount(800.0, jump).unwrap();
            assert_abs_diff_eq!(before, after, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_rate_tier_is_never_left() {
        let tb = TieredBalance::new(vec![0.0, 1000.0], vec![0.0, 0.02]).unwrap();
        assert!(tb.jump_times(500.0).unwrap().is_empty());
        assert_abs_diff_eq!(tb.amount(500.0, 1.0).unwrap(), 500.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tb.amount(500.0, 50.0).unwrap(), 500.0, epsilon = 1e-12);

        // Starting above the zero-rate tier grows normally
        assert_abs_diff_eq!(tb.amount(2000.0, 1.0).unwrap(), 2040.0, epsilon = 1e-9);

        // A zero-rate middle tier stops the climb there
        let tb = TieredBalance::new(vec![0.0, 1000.0, 5000.0], vec![0.05, 0.0, 0.10]).unwrap();
        let jumps = tb.jump_times(800.0).unwrap();
        assert_eq!(jumps.len(), 1);
        assert_abs_diff_eq!(tb.amount(800.0, jumps[0] + 10.0).unwrap(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tier_validation() {
        assert!(matches!(
            TieredBalance::new(vec![0.0, 1000.0], vec![0.01]),
            Err(TvmError::Config(_))
        ));
        assert!(matches!(
            TieredBalance::new(vec![1000.0, 0.0], vec![0.01, 0.02]),
            Err(TvmError::Config(_))
        ));
        assert!(matches!(
            TieredTime::new(vec![0.0, 1.0, 2.0], vec![0.01, 0.02]),
            Err(TvmError::Config(_))
        ));
    }

    #[test]
    fn test_tiered_time() {
        let tt = TieredTime::new(vec![0.0, 1.0, 2.0], vec![0.01, 0.02, 0.03]).unwrap();
        let amt = Amount::new(tt, 1000.0).unwrap();

        assert_abs_diff_eq!(amt.value_at(0.0).unwrap(), 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(amt.value_at(0.5).unwrap(), 1000.0 * 1.01_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(amt.value_at(2.0).unwrap(), 1000.0 * 1.01 * 1.02, epsilon = 1e-9);
        assert_abs_diff_eq!(
            amt.value_at(4.0).unwrap(),
            1000.0 * 1.01 * 1.02 * 1.03_f64.powi(2),
            epsilon = 1e-9
        );

        // Period-by-period effective rates step with the tiers
        let acc = amt.accumulation();
        assert_abs_diff_eq!(acc.nth_period_effective_rate(2).unwrap().rate, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(acc.nth_period_effective_rate(5).unwrap().rate, 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_tiered_time_with_simple_rate() {
        let tt = TieredTime::new(vec![0.0, 2.0], vec![Rate::simple(0.05), Rate::effective(0.04)]).unwrap();
        let acc = Accumulation::new(tt);
        assert_abs_diff_eq!(acc.value_at(2.0).unwrap(), 1.10, epsilon = 1e-12);
        assert_abs_diff_eq!(acc.value_at(3.0).unwrap(), 1.10 * 1.04, epsilon = 1e-12);
    }
}
