//! Closed-form solvers for simple and compound interest
//!
//! Supply all but one of present value, future value, rate and time; the
//! solver returns the missing quantity.

use serde::{Deserialize, Serialize};

use crate::error::{TvmError, TvmResult};
use crate::growth::rule::GrowthRule;
use crate::rates::Rate;

/// The quantity a solver produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Solved {
    PresentValue(f64),
    FutureValue(f64),
    Rate(Rate),
    Time(f64),
}

impl Solved {
    /// The solved number, whatever it represents
    pub fn value(&self) -> f64 {
        match self {
            Solved::PresentValue(v) | Solved::FutureValue(v) | Solved::Time(v) => *v,
            Solved::Rate(r) => r.rate,
        }
    }
}

fn count_missing(args: &[bool]) -> TvmResult<()> {
    let missing = args.iter().filter(|&&present| !present).count();
    if missing != 1 {
        return Err(TvmError::config(format!(
            "exactly one argument must be missing, got {}",
            missing
        )));
    }
    Ok(())
}

fn nonzero(value: f64, what: &str) -> TvmResult<f64> {
    if value == 0.0 {
        return Err(TvmError::domain(format!("{} must be non-zero", what)));
    }
    Ok(value)
}

/// Solve `fv = pv (1 + r t)` for whichever argument is `None`
pub fn simple_interest_solver(
    pv: Option<f64>,
    fv: Option<f64>,
    rate: Option<f64>,
    t: Option<f64>,
) -> TvmResult<Solved> {
    count_missing(&[pv.is_some(), fv.is_some(), rate.is_some(), t.is_some()])?;

    let solved = match (pv, fv, rate, t) {
        (None, Some(fv), Some(r), Some(t)) => Solved::PresentValue(fv / nonzero(1.0 + r * t, "1 + rt")?),
        (Some(pv), None, Some(r), Some(t)) => Solved::FutureValue(pv * (1.0 + r * t)),
        (Some(pv), Some(fv), None, Some(t)) => {
            Solved::Rate(Rate::simple((fv / nonzero(pv, "present value")? - 1.0) / nonzero(t, "time")?))
        }
        (Some(pv), Some(fv), Some(r), None) => {
            Solved::Time((fv / nonzero(pv, "present value")? - 1.0) / nonzero(r, "rate")?)
        }
        _ => unreachable!("exactly one argument is missing"),
    };
    Ok(solved)
}

/// Solve `fv = pv (1 + i)^t` for whichever argument is `None`.
///
/// Any compound-convention rate is accepted and standardized to its annual
/// effective rate; a solved rate is returned as annual effective interest.
pub fn compound_interest_solver(
    pv: Option<f64>,
    fv: Option<f64>,
    t: Option<f64>,
    rate: Option<Rate>,
) -> TvmResult<Solved> {
    count_missing(&[pv.is_some(), fv.is_some(), t.is_some(), rate.is_some()])?;

    let i = rate.map(|r| r.effective_annual()).transpose()?;

    let solved = match (pv, fv, t, i) {
        (None, Some(fv), Some(t), Some(i)) => Solved::PresentValue(fv / (1.0 + i).powf(t)),
        (Some(pv), None, Some(t), Some(i)) => Solved::FutureValue(pv * (1.0 + i).powf(t)),
        (Some(pv), Some(fv), None, Some(i)) => {
            let growth = nonzero((1.0 + i).ln(), "ln(1 + i)")?;
            Solved::Time((fv / nonzero(pv, "present value")?).ln() / growth)
        }
        (Some(pv), Some(fv), Some(t), None) => {
            let ratio = fv / nonzero(pv, "present value")?;
            Solved::Rate(Rate::effective(ratio.powf(1.0 / nonzero(t, "time")?) - 1.0))
        }
        _ => unreachable!("exactly one argument is missing"),
    };
    Ok(solved)
}

/// Initial investment needed under `rule` to grow to `fv` by time `t`
pub fn initial_principal_solver(rule: &dyn GrowthRule, fv: f64, t: f64) -> TvmResult<f64> {
    Ok(fv / rule.accumulation(t)?)
}

/// Period `n` in which simple interest at rate `s` has effective rate `es`
pub fn simple_interval_solver(s: f64, es: f64) -> f64 {
    1.0 / es + 1.0 - 1.0 / s
}
