//! Discount-based growth: interest charged up front
//!
//! Both rules raise a domain error where the discount function reaches zero
//! instead of returning an infinite or negative value.

use serde::{Deserialize, Serialize};

use crate::error::{TvmError, TvmResult};
use crate::growth::amount::{Accumulation, Amount};
use crate::growth::rule::GrowthRule;

/// Linear discount at rate `d`: `k / (1 - d t)`, defined while `d t < 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleDiscount {
    discount_rate: f64,
}

impl SimpleDiscount {
    pub fn new(discount_rate: f64) -> Self {
        Self { discount_rate }
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Force of interest at time `t`: `d / (1 - d t)`
    pub fn delta(&self, t: f64) -> TvmResult<f64> {
        Ok(self.discount_rate / self.denominator(t)?)
    }

    fn denominator(&self, t: f64) -> TvmResult<f64> {
        let denom = 1.0 - self.discount_rate * t;
        if denom <= 0.0 {
            return Err(TvmError::domain(format!(
                "simple discount at rate {} is undefined from time {}",
                self.discount_rate,
                1.0 / self.discount_rate
            )));
        }
        Ok(denom)
    }
}

impl GrowthRule for SimpleDiscount {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok(k / self.denominator(t)?)
    }
}

/// Compound discount at rate `d`: `k (1 - d)^(-t)`, requires `d < 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundDiscount {
    discount_rate: f64,
}

impl CompoundDiscount {
    pub fn new(discount_rate: f64) -> TvmResult<Self> {
        if discount_rate >= 1.0 {
            return Err(TvmError::domain(format!(
                "compound discount rate must be below 1, got {}",
                discount_rate
            )));
        }
        Ok(Self { discount_rate })
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Equivalent annual effective interest rate, `d / (1 - d)`
    pub fn interest_rate(&self) -> f64 {
        self.discount_rate / (1.0 - self.discount_rate)
    }
}

impl GrowthRule for CompoundDiscount {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok(k * (1.0 - self.discount_rate).powf(-t))
    }

    fn level_rate(&self) -> Option<f64> {
        Some(self.interest_rate())
    }
}

impl Amount {
    /// Simple discount amount function
    pub fn simple_discount(k: f64, discount_rate: f64) -> TvmResult<Amount> {
        Amount::new(SimpleDiscount::new(discount_rate), k)
    }

    /// Compound discount amount function
    pub fn compound_discount(k: f64, discount_rate: f64) -> TvmResult<Amount> {
        Amount::new(CompoundDiscount::new(discount_rate)?, k)
    }
}

impl Accumulation {
    /// Simple discount accumulation function
    pub fn simple_discount(discount_rate: f64) -> Accumulation {
        Accumulation::new(SimpleDiscount::new(discount_rate))
    }

    /// Compound discount accumulation function
    pub fn compound_discount(discount_rate: f64) -> TvmResult<Accumulation> {
        Ok(Accumulation::new(CompoundDiscount::new(discount_rate)?))
    }
}
