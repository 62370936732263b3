//! Generic cashflow lists
//!
//! A [`Payments`] list values any set of `(amount, time)` pairs by summing
//! each cashflow discounted (or accumulated) under one accumulation
//! function. Annuities fall back to this when no closed form applies.

use crate::error::{check_time, TvmError, TvmResult};
use crate::growth::{Accumulation, GrowthFunction};

/// Ordered list of cashflows valued under a single accumulation function
#[derive(Debug, Clone)]
pub struct Payments {
    amounts: Vec<f64>,
    times: Vec<f64>,
    growth: Accumulation,
}

impl Payments {
    /// Create from parallel lists of amounts and non-negative times
    pub fn new(
        amounts: Vec<f64>,
        times: Vec<f64>,
        growth: impl Into<Accumulation>,
    ) -> TvmResult<Self> {
        if amounts.len() != times.len() {
            return Err(TvmError::config(format!(
                "{} amounts supplied with {} times",
                amounts.len(),
                times.len()
            )));
        }
        for &t in &times {
            check_time(t)?;
        }

        Ok(Self {
            amounts,
            times,
            growth: growth.into(),
        })
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn growth(&self) -> &Accumulation {
        &self.growth
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Undiscounted sum of all cashflows
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    /// Value at time 0 of all cashflows
    pub fn net_present_value(&self) -> TvmResult<f64> {
        self.amounts
            .iter()
            .zip(&self.times)
            .map(|(&amount, &t)| self.growth.discount_factor(t, amount))
            .sum()
    }

    /// Value at time `t` of all cashflows
    pub fn equivalent_value_at(&self, t: f64) -> TvmResult<f64> {
        Ok(self.net_present_value()? * self.growth.value_at(t)?)
    }
}
