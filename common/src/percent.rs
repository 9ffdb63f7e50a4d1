//! [`Percent`]-related definitions.

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0}%")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] from a whole number of percents, saturating
    /// at `100`.
    #[must_use]
    pub const fn whole(val: u8) -> Self {
        let val = if val > 100 { 100 } else { val };
        Self(Decimal::from_parts(val as u32, 0, 0, false, 0))
    }

    /// Returns this [`Percent`] as a fraction of one (`5%` is `0.05`).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns the remainder of this [`Percent`] up to `100%`.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(Decimal::ONE_HUNDRED - self.0)
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn whole_saturates() {
        assert_eq!(Percent::whole(20).fraction(), Decimal::new(2, 1));
        assert_eq!(Percent::whole(250), Percent::whole(100));
        assert_eq!(Percent::whole(250).complement().fraction(), Decimal::ZERO);
    }

    #[test]
    fn fraction_and_complement() {
        let p = Percent::whole(5);

        assert_eq!(p.fraction(), Decimal::new(5, 2));
        assert_eq!(p.complement(), Percent::whole(95));
        assert_eq!(p.to_string(), "5%");
    }
}
