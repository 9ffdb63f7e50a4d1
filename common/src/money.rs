//! [`Money`]-related definitions.

use std::fmt;

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::{define_kind, Percent};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero amount of [`Money`] in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Creates a new amount of [`Money`] in Vietnamese đồng.
    #[must_use]
    pub fn vnd(amount: impl Into<Decimal>) -> Self {
        Self {
            amount: amount.into(),
            currency: Currency::Vnd,
        }
    }

    /// Multiplies this amount by the provided number of units.
    #[must_use]
    pub fn times(self, units: u16) -> Self {
        Self {
            amount: self.amount * Decimal::from(units),
            currency: self.currency,
        }
    }

    /// Applies the provided `discount` to this amount, without rounding.
    #[must_use]
    pub fn discounted(self, discount: Percent) -> Self {
        Self {
            amount: self.amount * discount.complement().fraction(),
            currency: self.currency,
        }
    }

    /// Rounds this amount to the nearest whole unit, with halves rounded away
    /// from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
            currency: self.currency,
        }
    }

    /// Indicates whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns this amount as a whole number of units, if it has no
    /// fractional part.
    #[must_use]
    pub fn whole(&self) -> Option<i64> {
        self.amount
            .is_integer()
            .then(|| self.amount.to_i64())
            .flatten()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if let Some(whole) = amount.is_integer().then(|| amount.to_i128()).flatten() {
            write!(f, "{whole}{currency}")
        } else {
            write!(f, "{}{currency}", amount.normalize())
        }
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    #[serialize_all = "UPPERCASE"]
    enum Currency {
        #[doc = "Vietnamese đồng."]
        Vnd = 1,
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::vnd(decimal("31500")).to_string(), "31500VND");
        assert_eq!(Money::vnd(decimal("31500.00")).to_string(), "31500VND");
        assert_eq!(Money::vnd(decimal("12.50")).to_string(), "12.5VND");
        assert_eq!(Money::zero(Currency::Vnd).to_string(), "0VND");
    }

    #[test]
    fn discounts_exactly() {
        let total = Money::vnd(5000).times(7).discounted(Percent::whole(10));

        assert_eq!(total.rounded(), Money::vnd(31500));
        assert_eq!(total.rounded().whole(), Some(31500));
    }

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(Money::vnd(decimal("2.5")).rounded(), Money::vnd(3));
        assert_eq!(Money::vnd(decimal("2.49")).rounded(), Money::vnd(2));
        assert_eq!(Money::vnd(decimal("3.5")).rounded(), Money::vnd(4));
    }

    #[test]
    fn whole_rejects_fractions() {
        assert_eq!(Money::vnd(decimal("1.5")).whole(), None);
        assert!(Money::zero(Currency::Vnd).is_zero());
    }
}
