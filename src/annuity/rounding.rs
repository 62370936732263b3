//! Cents rounding in decimal arithmetic

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{TvmError, TvmResult};

fn to_cents(value: f64, strategy: RoundingStrategy) -> TvmResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, strategy))
        .ok_or_else(|| TvmError::domain(format!("{} cannot be rounded to cents", value)))
}

fn to_f64(value: Decimal) -> TvmResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| TvmError::domain(format!("{} does not fit in an f64", value)))
}

/// Round to the nearest cent, ties to even
pub fn round_cents(value: f64) -> TvmResult<f64> {
    to_f64(to_cents(value, RoundingStrategy::MidpointNearestEven)?)
}

/// Round away from zero to the next whole cent
pub fn round_cents_up(value: f64) -> TvmResult<f64> {
    to_f64(to_cents(value, RoundingStrategy::AwayFromZero)?)
}

/// Whether two amounts agree once rounded to the cent
pub fn same_cents(a: f64, b: f64) -> TvmResult<bool> {
    Ok(to_cents(a, RoundingStrategy::MidpointNearestEven)?
        == to_cents(b, RoundingStrategy::MidpointNearestEven)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(2246.2711349).unwrap(), 2246.27);
        assert_eq!(round_cents(0.125).unwrap(), 0.12);
        assert_eq!(round_cents(0.135).unwrap(), 0.14);
        assert_eq!(round_cents(-1.006).unwrap(), -1.01);
    }

    #[test]
    fn test_round_cents_up() {
        assert_eq!(round_cents_up(2246.2711349).unwrap(), 2246.28);
        assert_eq!(round_cents_up(2246.5).unwrap(), 2246.5);
        assert_eq!(round_cents_up(0.001).unwrap(), 0.01);
    }

    #[test]
    fn test_same_cents() {
        assert!(same_cents(9999.998, 10000.0).unwrap());
        assert!(!same_cents(9999.99, 10000.0).unwrap());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(round_cents(f64::NAN).is_err());
        assert!(round_cents_up(f64::INFINITY).is_err());
    }
}
