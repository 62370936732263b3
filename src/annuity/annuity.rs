//! Annuities: regular payments at fixed intervals
//!
//! Present and accumulated values use closed forms when both the payments
//! and the interest rate are level, and fall back to summing the underlying
//! cashflow list otherwise.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cashflow::Payments;
use crate::error::{check_time, TvmError, TvmResult};
use crate::growth::{Accumulation, GrowthFunction};

/// Decimal places intervals are compared at
const INTERVAL_DECIMALS: i32 = 7;

pub(crate) fn round_interval(x: f64) -> f64 {
    let scale = 10f64.powi(INTERVAL_DECIMALS);
    (x * scale).round() / scale
}

/// Number of whole periods needed to cover `x` periods
pub(crate) fn ceil_count(x: f64) -> f64 {
    round_interval(x).ceil()
}

/// When payments fall within each period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    /// Paid at the end of each period
    #[default]
    Immediate,
    /// Paid at the start of each period
    Due,
}

impl Timing {
    fn offset(&self) -> f64 {
        match self {
            Timing::Immediate => 1.0,
            Timing::Due => 0.0,
        }
    }
}

impl FromStr for Timing {
    type Err = TvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(Timing::Immediate),
            "due" => Ok(Timing::Due),
            other => Err(TvmError::config(format!(
                "timing can either be immediate or due, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timing::Immediate => write!(f, "immediate"),
            Timing::Due => write!(f, "due"),
        }
    }
}

/// Payment size: one level amount, or one amount per payment
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentAmount {
    Level(f64),
    Schedule(Vec<f64>),
}

/// A sequence of payments at regular intervals
#[derive(Debug, Clone)]
pub struct Annuity {
    payments: Payments,
    amount: PaymentAmount,
    period: f64,
    term: f64,
    timing: Timing,
    level_payment: Option<bool>,
}

impl Annuity {
    /// Level payments of `amount` every `period` over `term`.
    ///
    /// An infinite `term` builds a perpetuity.
    pub fn level(
        growth: impl Into<Accumulation>,
        amount: f64,
        period: f64,
        term: f64,
        timing: Timing,
    ) -> TvmResult<Self> {
        if !(period > 0.0) || !period.is_finite() {
            return Err(TvmError::domain(format!(
                "payment period must be positive, got {}",
                period
            )));
        }
        check_time(term)?;

        if term.is_infinite() {
            return Ok(Self {
                payments: Payments::new(Vec::new(), Vec::new(), growth)?,
                amount: PaymentAmount::Level(amount),
                period,
                term,
                timing,
                level_payment: None,
            });
        }

        let count = ceil_count(term / period) as usize;
        let offset = timing.offset();
        let times: Vec<f64> = (0..count).map(|j| period * (j as f64 + offset)).collect();

        Ok(Self {
            payments: Payments::new(vec![amount; count], times, growth)?,
            amount: PaymentAmount::Level(amount),
            period,
            term,
            timing,
            level_payment: Some(true),
        })
    }

    /// Level perpetuity of `amount` every `period`
    pub fn perpetuity(
        growth: impl Into<Accumulation>,
        amount: f64,
        period: f64,
        timing: Timing,
    ) -> TvmResult<Self> {
        Self::level(growth, amount, period, f64::INFINITY, timing)
    }

    /// Payments of varying size at evenly spaced times.
    ///
    /// The period is inferred from the spacing. A payment at time 0 makes the
    /// annuity due (term ends one period after the last payment); otherwise
    /// it is immediate and the term ends at the last payment. Unevenly spaced
    /// times belong in a [`Payments`] list instead.
    pub fn from_schedule(
        growth: impl Into<Accumulation>,
        amounts: &[f64],
        times: &[f64],
    ) -> TvmResult<Self> {
        if amounts.len() != times.len() {
            return Err(TvmError::config(format!(
                "{} amounts supplied with {} times",
                amounts.len(),
                times.len()
            )));
        }
        if times.len() < 2 {
            return Err(TvmError::config(
                "at least two payments are needed to infer the period, \
                 use Annuity::level for a single level amount",
            ));
        }
        for &t in times {
            check_time(t)?;
        }

        let mut schedule: Vec<(f64, f64)> =
            times.iter().copied().zip(amounts.iter().copied()).collect();
        schedule.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (times, amounts): (Vec<f64>, Vec<f64>) = schedule.into_iter().unzip();

        let intervals: Vec<f64> =
            times.windows(2).map(|w| round_interval(w[1] - w[0])).collect();
        if intervals.windows(2).any(|w| w[0] != w[1]) {
            return Err(TvmError::irregular(
                "payment times are not evenly spaced, use a Payments list instead",
            ));
        }
        let period = intervals[0];
        if !(period > 0.0) {
            return Err(TvmError::irregular("two payments share the same time"));
        }

        let first = times[0];
        let last = times[times.len() - 1];
        let (timing, term) = if first == 0.0 {
            (Timing::Due, last + period)
        } else {
            (Timing::Immediate, last)
        };

        Ok(Self {
            payments: Payments::new(amounts.clone(), times, growth)?,
            amount: PaymentAmount::Schedule(amounts),
            period,
            term,
            timing,
            // Schedules are always valued by summation, even when every
            // amount is the same
            level_payment: Some(false),
        })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn term(&self) -> f64 {
        self.term
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn amount(&self) -> &PaymentAmount {
        &self.amount
    }

    /// `Some(true)` for level annuities, `Some(false)` for schedules, `None`
    /// for perpetuities
    pub fn is_level_payment(&self) -> Option<bool> {
        self.level_payment
    }

    pub fn is_perpetuity(&self) -> bool {
        self.term.is_infinite()
    }

    /// The underlying cashflow list (empty for a perpetuity)
    pub fn payments(&self) -> &Payments {
        &self.payments
    }

    pub fn growth(&self) -> &Accumulation {
        self.payments.growth()
    }

    /// Payment times in ascending order
    pub fn times(&self) -> &[f64] {
        self.payments.times()
    }

    /// Name of the payment pattern, e.g. "annuity-immediate"
    pub fn pattern(&self) -> String {
        let kind = if self.is_perpetuity() { "perpetuity" } else { "annuity" };
        format!("{}-{}", kind, self.timing)
    }

    /// Level amount and one-period growth factor when a closed form applies
    fn closed_form_inputs(&self) -> TvmResult<Option<(f64, f64)>> {
        let amount = match (&self.amount, self.level_payment) {
            (PaymentAmount::Level(amount), Some(true)) => *amount,
            _ => return Ok(None),
        };
        if !self.growth().is_level() {
            return Ok(None);
        }
        let growth_factor = self.growth().value_at(self.period)?;
        if growth_factor == 1.0 {
            return Ok(None);
        }
        Ok(Some((amount, growth_factor)))
    }

    fn due_factor(&self, growth_factor: f64) -> f64 {
        match self.timing {
            Timing::Immediate => 1.0,
            Timing::Due => growth_factor,
        }
    }

    fn perpetuity_present_value(&self) -> TvmResult<f64> {
        let amount = match self.amount {
            PaymentAmount::Level(amount) => amount,
            PaymentAmount::Schedule(_) => {
                return Err(TvmError::config("a perpetuity requires a level payment"))
            }
        };
        if !self.growth().is_level() {
            return Err(TvmError::domain(
                "a perpetuity can only be valued under a level interest rate",
            ));
        }
        let growth_factor = self.growth().value_at(self.period)?;
        if growth_factor == 1.0 {
            return Err(TvmError::domain(
                "a perpetuity has no finite value at a zero interest rate",
            ));
        }
        Ok(amount / (growth_factor - 1.0) * self.due_factor(growth_factor))
    }

    /// Value at time 0 of all payments
    pub fn present_value(&self) -> TvmResult<f64> {
        if self.is_perpetuity() {
            return self.perpetuity_present_value();
        }

        match self.closed_form_inputs()? {
            Some((amount, growth_factor)) => {
                debug!("{} present value by closed form", self.pattern());
                let discount = self.growth().discount_factor(self.term, 1.0)?;
                Ok(amount * (1.0 - discount) / (growth_factor - 1.0)
                    * self.due_factor(growth_factor))
            }
            None => {
                debug!(
                    "{} present value by summing {} payments",
                    self.pattern(),
                    self.payments.len()
                );
                self.payments.net_present_value()
            }
        }
    }

    /// Value at the end of the term of all payments
    pub fn accumulated_value(&self) -> TvmResult<f64> {
        if self.is_perpetuity() {
            return Err(TvmError::domain("a perpetuity has no accumulated value"));
        }

        let interest_rate = self.growth().interest_rate();
        match (self.closed_form_inputs()?, interest_rate) {
            (Some((amount, growth_factor)), Some(i)) => {
                debug!("{} accumulated value by closed form", self.pattern());
                Ok(amount * ((1.0 + i).powf(self.term) - 1.0) / (growth_factor - 1.0)
                    * self.due_factor(growth_factor))
            }
            _ => {
                debug!(
                    "{} accumulated value by summing {} payments",
                    self.pattern(),
                    self.payments.len()
                );
                self.payments.equivalent_value_at(self.term)
            }
        }
    }
}
