//! Loan and savings payments, payment counts, and outstanding balances
//!
//! Payments can be reconciled to whole cents: when the rounded payment no
//! longer reproduces the target, the payment is rounded up and the final
//! payment is reduced to absorb the overshoot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::annuity::annuity::{ceil_count, Annuity, Timing};
use crate::annuity::rounding::{round_cents, round_cents_up, same_cents};
use crate::error::{check_time, TvmError, TvmResult};
use crate::growth::{Accumulation, GrowthFunction};
use crate::rates::{Rate, RatePattern};

/// A regular payment together with a smaller balancing final payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installments {
    /// Every payment but the last
    pub amount: f64,
    /// Final payment
    pub last: f64,
}

/// Result of solving for a payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LoanPayment {
    /// Every payment is the same
    Level(f64),
    /// Rounded-up payments with a balancing final payment
    Balanced(Installments),
}

impl LoanPayment {
    /// The regular payment
    pub fn regular(&self) -> f64 {
        match self {
            LoanPayment::Level(amount) => *amount,
            LoanPayment::Balanced(installments) => installments.amount,
        }
    }

    /// The final payment
    pub fn last(&self) -> f64 {
        match self {
            LoanPayment::Level(amount) => *amount,
            LoanPayment::Balanced(installments) => installments.last,
        }
    }

    /// Full list of `count` payment amounts
    pub fn amounts(&self, count: usize) -> Vec<f64> {
        let mut amounts = vec![self.regular(); count];
        if let Some(last) = amounts.last_mut() {
            *last = self.last();
        }
        amounts
    }
}

/// Loan amount supported by a down payment plus level loan payments
pub fn loan_amount_from_payment(
    down_payment: f64,
    payment: f64,
    period: f64,
    term: f64,
    growth: impl Into<Accumulation>,
) -> TvmResult<f64> {
    let annuity = Annuity::level(growth, payment, period, term, Timing::Immediate)?;
    Ok(down_payment + annuity.present_value()?)
}

/// Level payment that repays `loan_amount` over `term`
pub fn payment_from_loan_amount(
    loan_amount: f64,
    period: f64,
    term: f64,
    growth: impl Into<Accumulation>,
    timing: Timing,
    round_to_cents: bool,
) -> TvmResult<LoanPayment> {
    let growth: Accumulation = growth.into();
    let present_value = |amount: f64| {
        Annuity::level(growth.clone(), amount, period, term, timing)?.present_value()
    };

    let payment = loan_amount / present_value(1.0)?;
    if !round_to_cents {
        return Ok(LoanPayment::Level(payment));
    }

    let rounded = round_cents(payment)?;
    if same_cents(loan_amount, present_value(rounded)?)? {
        debug!("payment {} repays {} to the cent", rounded, loan_amount);
        return Ok(LoanPayment::Level(rounded));
    }

    // The excess comes off the final payment, so it is grown to that
    // payment's time: term - period for a loan due, term for one immediate
    let rounded_up = round_cents_up(payment)?;
    let schedule = Annuity::level(growth.clone(), rounded_up, period, term, timing)?;
    let overshoot = schedule.present_value()? - loan_amount;
    let last_time = schedule.times().last().copied().unwrap_or(term);
    let excess_at_last = round_cents(overshoot * growth.value_at(last_time)?)?;
    let last = round_cents(rounded_up - excess_at_last)?;
    debug!(
        "payment {} overshoots {} by {:.6}, final payment {}",
        rounded_up, loan_amount, overshoot, last
    );

    Ok(LoanPayment::Balanced(Installments {
        amount: rounded_up,
        last,
    }))
}

/// Level end-of-period deposit that accumulates to `future_value` by `term`
pub fn savings_payment_from_future_value(
    future_value: f64,
    period: f64,
    term: f64,
    growth: impl Into<Accumulation>,
    round_to_cents: bool,
) -> TvmResult<LoanPayment> {
    let growth: Accumulation = growth.into();
    let accumulated_value = |amount: f64| {
        Annuity::level(growth.clone(), amount, period, term, Timing::Immediate)?
            .accumulated_value()
    };

    let payment = future_value / accumulated_value(1.0)?;
    if !round_to_cents {
        return Ok(LoanPayment::Level(payment));
    }

    let rounded = round_cents(payment)?;
    if same_cents(future_value, accumulated_value(rounded)?)? {
        debug!("deposit {} reaches {} to the cent", rounded, future_value);
        return Ok(LoanPayment::Level(rounded));
    }

    // The overshoot is already measured at the end of the term
    let rounded_up = round_cents_up(payment)?;
    let overshoot = accumulated_value(rounded_up)? - future_value;
    let last = round_cents(rounded_up - round_cents(overshoot)?)?;
    debug!(
        "deposit {} overshoots {} by {:.6}, final deposit {}",
        rounded_up, future_value, overshoot, last
    );

    Ok(LoanPayment::Balanced(Installments {
        amount: rounded_up,
        last,
    }))
}

/// Number of level deposits of `payment` every `period` needed to reach
/// `future_value`
pub fn number_of_payments(
    payment: f64,
    future_value: f64,
    period: f64,
    rate: &Rate,
) -> TvmResult<u64> {
    if !(payment > 0.0) {
        return Err(TvmError::domain(format!("payment must be positive, got {}", payment)));
    }
    let i = rate.convert(RatePattern::EffectiveInterest, period)?.rate;

    let n = if i == 0.0 {
        future_value / payment
    } else {
        let ratio = future_value / payment * i + 1.0;
        if !(ratio > 0.0) {
            return Err(TvmError::domain(format!(
                "deposits of {} never reach {}",
                payment, future_value
            )));
        }
        ratio.ln() / (1.0 + i).ln()
    };

    if !n.is_finite() {
        return Err(TvmError::domain(format!(
            "deposits of {} never reach {}",
            payment, future_value
        )));
    }
    Ok(ceil_count(n).max(0.0) as u64)
}

/// Outstanding loan balance at `t`, retrospective method: the loan
/// accumulated to `t` less the payments made so far accumulated to `t`
pub fn outstanding_loan_balance_retrospective(
    loan: f64,
    payment: f64,
    period: f64,
    growth: impl Into<Accumulation>,
    t: f64,
) -> TvmResult<f64> {
    let growth: Accumulation = growth.into();
    let paid = Annuity::level(growth.clone(), payment, period, t, Timing::Immediate)?;
    let balance = loan * growth.value_at(t)? - paid.accumulated_value()?;
    Ok(balance.max(0.0))
}

/// Outstanding loan balance at `t`, prospective method: the value at `t`
/// of the payments still to come.
///
/// A `residual_payment` replaces the final scheduled payment at `term`.
/// Each time in `missed_payments` adds back a skipped payment accumulated
/// to `t`.
pub fn outstanding_loan_balance_prospective(
    payment: f64,
    period: f64,
    term: f64,
    growth: impl Into<Accumulation>,
    t: f64,
    residual_payment: Option<f64>,
    missed_payments: &[f64],
) -> TvmResult<f64> {
    check_time(t)?;
    if t > term {
        return Err(TvmError::domain(format!(
            "balance requested at {} after the loan term {}",
            t, term
        )));
    }
    let growth: Accumulation = growth.into();

    let mut balance = match residual_payment {
        Some(residual) => {
            let remaining = (term - t - period).max(0.0);
            let regular =
                Annuity::level(growth.clone(), payment, period, remaining, Timing::Immediate)?;
            regular.present_value()? + growth.discount_factor(term - t, residual)?
        }
        None => {
            Annuity::level(growth.clone(), payment, period, term - t, Timing::Immediate)?
                .present_value()?
        }
    };

    for &missed in missed_payments {
        if missed > t {
            return Err(TvmError::domain(format!(
                "missed payment at {} is after the valuation time {}",
                missed, t
            )));
        }
        balance += payment * growth.value_at(t - missed)?;
    }

    Ok(balance)
}
