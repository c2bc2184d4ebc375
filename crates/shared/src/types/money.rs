//! Money type with fixed two-digit decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and keeps every amount at exactly
//! two fractional digits so totals never drift.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits carried by every amount.
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount in the shop's single currency.
///
/// Serialized as a decimal string (e.g. `"25.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount, rounding half away from zero to two places.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        let mut rounded =
            amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MONEY_SCALE);
        Self(rounded)
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies a unit price by a count, saturating at the decimal range.
    ///
    /// Used for report figures. Billed amounts go through [`Money::checked_times`].
    #[must_use]
    pub fn times(&self, count: i64) -> Self {
        Self::new(self.0.saturating_mul(Decimal::from(count)))
    }

    /// Multiplies a unit price by a count, or `None` if the product does not fit.
    #[must_use]
    pub fn checked_times(&self, count: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count)).map(Self::new)
    }

    /// Adds two amounts, or `None` if the sum does not fit.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self::new)
    }

    /// Sums amounts, or `None` if any partial sum does not fit.
    #[must_use]
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Saturating addition.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_is_rescaled_to_two_places() {
        assert_eq!(Money::new(dec!(5)).to_string(), "5.00");
        assert_eq!(Money::new(dec!(5.1)).to_string(), "5.10");
        assert_eq!(Money::new(dec!(19.999)).to_string(), "20.00");
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(0.135)).amount(), dec!(0.14));
        assert_eq!(Money::new(dec!(-0.125)).amount(), dec!(-0.13));
    }

    #[test]
    fn test_money_times() {
        let price = Money::new(dec!(5.00));
        assert_eq!(price.times(4), Money::new(dec!(20.00)));
        assert_eq!(price.times(0), Money::ZERO);
    }

    #[test]
    fn test_money_sum_has_no_drift() {
        let cents: Vec<Money> = (0..1000).map(|_| Money::new(dec!(0.10))).collect();
        let total: Money = cents.iter().sum();
        assert_eq!(total, Money::new(dec!(100.00)));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Money::new(dec!(1))), None);
        assert_eq!(Money::checked_sum([huge, huge]), None);

        let price = Money::new(dec!(2.50));
        assert_eq!(price.checked_times(3), Some(Money::new(dec!(7.50))));
        assert_eq!(
            Money::checked_sum([price, price]),
            Some(Money::new(dec!(5.00)))
        );
        assert_eq!(Money::checked_sum([]), Some(Money::ZERO));
    }

    #[test]
    fn test_saturating_arithmetic_does_not_panic() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.times(i64::MAX), Money::new(Decimal::MAX));
        assert_eq!(huge.times(-2), Money::new(Decimal::MIN));
        assert_eq!(huge + huge, Money::new(Decimal::MAX));
        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total, Money::new(Decimal::MAX));
    }

    #[test]
    fn test_money_serializes_as_string() {
        let json = serde_json::to_string(&Money::new(dec!(25))).unwrap();
        assert_eq!(json, "\"25.00\"");
    }
}
