//! # Quantity Module
//!
//! Fixed-point quantities for cart lines and stock levels.
//!
//! Piece goods sell in whole counts, but weight and volume units (kg,
//! litres) sell fractionally: half a kilo of sugar is an ordinary sale.
//! The same integer discipline used for [`crate::money::Money`] applies
//! here: a `Quantity` is an i64 count of thousandths, so `1.5 kg` is
//! `Quantity::from_milli(1_500)` and no float ever enters a total.
//!
//! Quantities are signed: a negative quantity is a valid *delta* for stock
//! adjustments. Stock levels themselves are kept non-negative by the
//! catalog's clamp rule, not by this type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A quantity in thousandths of a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Quantity(i64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Quantity = Quantity(0);

    /// One whole unit.
    pub const ONE: Quantity = Quantity(1000);

    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Creates a quantity from thousandths.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Returns the raw thousandths count.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn whole(&self) -> i64 {
        self.0 / 1000
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds a signed delta, flooring the result at zero.
    ///
    /// This is the stock-adjustment rule: an oversell clamps to zero
    /// rather than rejecting the operation.
    #[inline]
    pub fn saturating_adjust(&self, delta: Quantity) -> Quantity {
        Quantity((self.0 + delta.0).max(0))
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Quantity {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Quantity(-self.0)
    }
}

/// Displays whole quantities without a fraction, fractional ones with
/// trailing zeros trimmed ("2", "1.5", "0.375").
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let frac = abs % 1000;
        if frac == 0 {
            write!(f, "{}{}", sign, abs / 1000)
        } else {
            let text = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, abs / 1000, text.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Quantity::from_whole(2).milli(), 2000);
        assert_eq!(Quantity::from_milli(1_500).whole(), 1);
        assert_eq!(Quantity::ONE, Quantity::from_whole(1));
    }

    #[test]
    fn test_saturating_adjust_clamps_at_zero() {
        let stock = Quantity::from_whole(3);
        let adjusted = stock.saturating_adjust(-Quantity::from_whole(8));
        assert_eq!(adjusted, Quantity::ZERO);
    }

    #[test]
    fn test_saturating_adjust_normal() {
        let stock = Quantity::from_whole(10);
        assert_eq!(
            stock.saturating_adjust(-Quantity::from_whole(4)),
            Quantity::from_whole(6)
        );
        assert_eq!(
            stock.saturating_adjust(Quantity::from_whole(5)),
            Quantity::from_whole(15)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::from_whole(2).to_string(), "2");
        assert_eq!(Quantity::from_milli(1_500).to_string(), "1.5");
        assert_eq!(Quantity::from_milli(375).to_string(), "0.375");
        assert_eq!((-Quantity::from_milli(2_250)).to_string(), "-2.25");
    }
}
