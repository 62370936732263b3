//! Interest and discount rates in their quoting conventions
//!
//! A `Rate` carries a value, the convention it is quoted in, and the
//! length of the period an effective rate applies to. Compound conventions
//! can all be standardized to an annual effective interest rate and converted
//! into each other; simple conventions cannot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TvmError, TvmResult};

/// Quoting convention of a rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RatePattern {
    /// Effective interest per `interval`
    EffectiveInterest,
    /// Effective discount per `interval`
    EffectiveDiscount,
    /// Nominal (APR-style) interest convertible `m` times per year
    NominalInterest { m: f64 },
    /// Nominal discount convertible `m` times per year
    NominalDiscount { m: f64 },
    /// Continuously compounded force of interest
    ForceOfInterest,
    /// Simple interest, linear accumulation
    SimpleInterest,
    /// Simple discount, linear discount function
    SimpleDiscount,
}

impl RatePattern {
    /// Compound conventions grow geometrically and are mutually convertible
    pub fn is_compound(&self) -> bool {
        !matches!(self, RatePattern::SimpleInterest | RatePattern::SimpleDiscount)
    }
}

impl fmt::Display for RatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatePattern::EffectiveInterest => write!(f, "effective interest"),
            RatePattern::EffectiveDiscount => write!(f, "effective discount"),
            RatePattern::NominalInterest { m } => write!(f, "nominal interest convertible {} times", m),
            RatePattern::NominalDiscount { m } => write!(f, "nominal discount convertible {} times", m),
            RatePattern::ForceOfInterest => write!(f, "force of interest"),
            RatePattern::SimpleInterest => write!(f, "simple interest"),
            RatePattern::SimpleDiscount => write!(f, "simple discount"),
        }
    }
}

/// An interest or discount rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Rate value as a decimal (0.05 = 5%)
    pub rate: f64,
    /// Quoting convention
    pub pattern: RatePattern,
    /// Period length the rate applies to (years)
    pub interval: f64,
}

impl Rate {
    fn with_pattern(rate: f64, pattern: RatePattern) -> Self {
        Self {
            rate,
            pattern,
            interval: 1.0,
        }
    }

    /// Annual effective interest rate
    pub fn effective(rate: f64) -> Self {
        Self::with_pattern(rate, RatePattern::EffectiveInterest)
    }

    /// Effective interest rate earned over `interval` years
    pub fn effective_over(rate: f64, interval: f64) -> Self {
        Self {
            rate,
            pattern: RatePattern::EffectiveInterest,
            interval,
        }
    }

    /// Annual effective discount rate
    pub fn effective_discount(rate: f64) -> Self {
        Self::with_pattern(rate, RatePattern::EffectiveDiscount)
    }

    /// Effective discount rate over `interval` years
    pub fn effective_discount_over(rate: f64, interval: f64) -> Self {
        Self {
            rate,
            pattern: RatePattern::EffectiveDiscount,
            interval,
        }
    }

    /// Nominal interest rate convertible `m` times per year
    pub fn nominal(rate: f64, m: f64) -> Self {
        Self::with_pattern(rate, RatePattern::NominalInterest { m })
    }

    /// Nominal discount rate convertible `m` times per year
    pub fn nominal_discount(rate: f64, m: f64) -> Self {
        Self::with_pattern(rate, RatePattern::NominalDiscount { m })
    }

    /// Force of interest (continuous compounding)
    pub fn force(delta: f64) -> Self {
        Self::with_pattern(delta, RatePattern::ForceOfInterest)
    }

    /// Simple interest rate per year
    pub fn simple(rate: f64) -> Self {
        Self::with_pattern(rate, RatePattern::SimpleInterest)
    }

    /// Simple discount rate per year
    pub fn simple_discount(rate: f64) -> Self {
        Self::with_pattern(rate, RatePattern::SimpleDiscount)
    }

    /// Whether the rate produces the same growth in every period of equal length
    pub fn is_level(&self) -> bool {
        self.pattern.is_compound()
    }

    /// Annual effective interest rate equivalent to this rate
    pub fn effective_annual(&self) -> TvmResult<f64> {
        let r = self.rate;
        let i = match self.pattern {
            RatePattern::EffectiveInterest if self.interval == 1.0 => r,
            RatePattern::EffectiveInterest => {
                self.check_interval()?;
                (1.0 + r).powf(1.0 / self.interval) - 1.0
            }
            RatePattern::EffectiveDiscount => {
                self.check_interval()?;
                if r >= 1.0 {
                    return Err(TvmError::domain(format!("discount rate {} must be below 1", r)));
                }
                (1.0 - r).powf(-1.0 / self.interval) - 1.0
            }
            RatePattern::NominalInterest { m } => {
                check_frequency(m)?;
                (1.0 + r / m).powf(m) - 1.0
            }
            RatePattern::NominalDiscount { m } => {
                check_frequency(m)?;
                if r >= m {
                    return Err(TvmError::domain(format!(
                        "nominal discount rate {} must be below its frequency {}",
                        r, m
                    )));
                }
                (1.0 - r / m).powf(-m) - 1.0
            }
            RatePattern::ForceOfInterest => r.exp() - 1.0,
            RatePattern::SimpleInterest | RatePattern::SimpleDiscount => {
                return Err(TvmError::config(format!(
                    "{} has no equivalent compound rate",
                    self.pattern
                )));
            }
        };
        Ok(i)
    }

    /// Convert to the annual effective interest convention
    pub fn standardize(&self) -> TvmResult<Rate> {
        self.convert(RatePattern::EffectiveInterest, 1.0)
    }

    /// Convert to an equivalent rate in another compound convention.
    ///
    /// `interval` is the period length for effective targets and is ignored
    /// for nominal and force targets.
    pub fn convert(&self, target: RatePattern, interval: f64) -> TvmResult<Rate> {
        let i = self.effective_annual()?;
        let growth = 1.0 + i;
        let converted = match target {
            RatePattern::EffectiveInterest => {
                check_positive_interval(interval)?;
                Rate::effective_over(growth.powf(interval) - 1.0, interval)
            }
            RatePattern::EffectiveDiscount => {
                check_positive_interval(interval)?;
                Rate::effective_discount_over(1.0 - growth.powf(-interval), interval)
            }
            RatePattern::NominalInterest { m } => {
                check_frequency(m)?;
                Rate::nominal(m * (growth.powf(1.0 / m) - 1.0), m)
            }
            RatePattern::NominalDiscount { m } => {
                check_frequency(m)?;
                Rate::nominal_discount(m * (1.0 - growth.powf(-1.0 / m)), m)
            }
            RatePattern::ForceOfInterest => Rate::force(growth.ln()),
            RatePattern::SimpleInterest | RatePattern::SimpleDiscount => {
                return Err(TvmError::config(format!(
                    "cannot convert a compound rate to {}",
                    target
                )));
            }
        };
        Ok(converted)
    }

    /// Growth of 1 unit invested at time 0, evaluated at time `t`
    pub fn accumulation(&self, t: f64) -> TvmResult<f64> {
        match self.pattern {
            RatePattern::SimpleInterest => {
                self.check_interval()?;
                Ok(1.0 + self.rate * t / self.interval)
            }
            RatePattern::SimpleDiscount => {
                self.check_interval()?;
                let denom = 1.0 - self.rate * t / self.interval;
                if denom <= 0.0 {
                    return Err(TvmError::domain(format!(
                        "simple discount {} is undefined at time {}",
                        self.rate, t
                    )));
                }
                Ok(1.0 / denom)
            }
            _ => Ok((1.0 + self.effective_annual()?).powf(t)),
        }
    }

    /// Value at time `t` of principal `k` invested at time 0
    pub fn amount(&self, k: f64, t: f64) -> TvmResult<f64> {
        Ok(k * self.accumulation(t)?)
    }

    /// Present value at time 0 of 1 unit due at time `t`
    pub fn discount(&self, t: f64) -> TvmResult<f64> {
        Ok(1.0 / self.accumulation(t)?)
    }

    /// Growth factor over one period of length `interval`
    pub fn value_at(&self, interval: f64) -> TvmResult<f64> {
        self.accumulation(interval)
    }

    fn check_interval(&self) -> TvmResult<()> {
        check_positive_interval(self.interval)
    }
}

fn check_positive_interval(interval: f64) -> TvmResult<()> {
    if !(interval > 0.0) {
        return Err(TvmError::domain(format!(
            "rate interval must be positive, got {}",
            interval
        )));
    }
    Ok(())
}

fn check_frequency(m: f64) -> TvmResult<()> {
    if !(m > 0.0) {
        return Err(TvmError::config(format!(
            "compounding frequency must be positive, got {}",
            m
        )));
    }
    Ok(())
}

impl From<f64> for Rate {
    fn from(rate: f64) -> Self {
        Rate::effective(rate)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}% {}", self.rate * 100.0, self.pattern)?;
        if (self.interval - 1.0).abs() > f64::EPSILON
            && matches!(
                self.pattern,
                RatePattern::EffectiveInterest | RatePattern::EffectiveDiscount
            )
        {
            write!(f, " over {} years", self.interval)?;
        }
        Ok(())
    }
}
