//! Error types for time-value-of-money calculations

use thiserror::Error;

/// Result alias used across the crate
pub type TvmResult<T> = Result<T, TvmError>;

/// Errors raised by growth functions, solvers and annuity valuation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TvmError {
    /// Wrong combination of supplied/missing arguments, conflicting options,
    /// or an unknown option value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A growth rule is missing a parameter the caller requires
    #[error("Validation error: {0}")]
    Validation(String),

    /// A time or value outside the domain where the calculation is defined
    #[error("Domain error: {0}")]
    Domain(String),

    /// Payment times are not evenly spaced
    #[error("Irregular payment intervals: {0}")]
    IrregularInterval(String),
}

impl TvmError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TvmError::Config(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        TvmError::Validation(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        TvmError::Domain(msg.into())
    }

    pub(crate) fn irregular(msg: impl Into<String>) -> Self {
        TvmError::IrregularInterval(msg.into())
    }
}

/// Reject negative or NaN times
pub(crate) fn check_time(t: f64) -> TvmResult<()> {
    if t.is_nan() || t < 0.0 {
        return Err(TvmError::domain(format!("time must be non-negative, got {}", t)));
    }
    Ok(())
}

/// Reject intervals that run backwards or start before zero
pub(crate) fn check_interval(t1: f64, t2: f64) -> TvmResult<()> {
    check_time(t1)?;
    check_time(t2)?;
    if t2 < t1 {
        return Err(TvmError::domain(format!(
            "end of interval ({}) must not precede its start ({})",
            t2, t1
        )));
    }
    Ok(())
}
