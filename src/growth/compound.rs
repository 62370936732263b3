//! Compound interest and continuously compounded growth

use serde::{Deserialize, Serialize};

use crate::error::TvmResult;
use crate::growth::amount::{Accumulation, Amount};
use crate::growth::rule::GrowthRule;
use crate::rates::Rate;

/// Geometric growth at an annual effective rate `i`: `k (1 + i)^t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    interest_rate: f64,
}

impl Compound {
    /// Standardize any compound-convention rate to its annual effective rate
    pub fn new(rate: impl Into<Rate>) -> TvmResult<Self> {
        Ok(Self {
            interest_rate: rate.into().effective_annual()?,
        })
    }

    /// Annual effective interest rate
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// One-period discount factor `v = 1 / (1 + i)`
    pub fn discount_factor(&self) -> f64 {
        1.0 / (1.0 + self.interest_rate)
    }
}

impl GrowthRule for Compound {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok(k * (1.0 + self.interest_rate).powf(t))
    }

    fn level_rate(&self) -> Option<f64> {
        Some(self.interest_rate)
    }
}

/// Continuous compounding at force of interest `delta`: `k e^(delta t)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    delta: f64,
}

impl Force {
    pub fn new(delta: f64) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Equivalent annual effective rate, `e^delta - 1`
    pub fn interest_rate(&self) -> f64 {
        self.delta.exp() - 1.0
    }
}

impl GrowthRule for Force {
    fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok(k * (self.delta * t).exp())
    }

    fn level_rate(&self) -> Option<f64> {
        Some(self.interest_rate())
    }
}

impl Amount {
    /// Compound interest amount function
    pub fn compound(k: f64, rate: impl Into<Rate>) -> TvmResult<Amount> {
        Amount::new(Compound::new(rate)?, k)
    }

    /// Continuously compounded amount function
    pub fn force(k: f64, delta: f64) -> TvmResult<Amount> {
        Amount::new(Force::new(delta), k)
    }
}

impl Accumulation {
    /// Compound interest accumulation function
    pub fn compound(rate: impl Into<Rate>) -> TvmResult<Accumulation> {
        Ok(Accumulation::new(Compound::new(rate)?))
    }

    /// Continuously compounded accumulation function
    pub fn force(delta: f64) -> Accumulation {
        Accumulation::new(Force::new(delta))
    }
}
