//! Value Objects for the storefront

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable catalog identifier of a product
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self { Self(value) }
    pub fn value(&self) -> u64 { self.0 }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self { Self(value) }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Money value object.
///
/// Always a whole number of the smallest currency unit. Nothing in the crate
/// converts it to a fractional representation; formatting happens only at
/// display time through [`crate::pricing::format_display_price`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn new(amount: u64) -> Self { Self(amount) }
    pub fn amount(&self) -> u64 { self.0 }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
    pub fn add(&self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
    pub fn multiply(&self, qty: u32) -> Money { Money(self.0.saturating_mul(u64::from(qty))) }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self { Self(amount) }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc.add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::pricing::format_display_price(*self))
    }
}

/// Quantity value object; never below one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Clamps anything below one (including negative input) to one.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// Returns `None` for values that are not a valid quantity.
    pub fn try_new(value: i64) -> Option<Self> {
        u32::try_from(value).ok().filter(|v| *v >= 1).map(Self)
    }

    pub fn value(&self) -> u32 { self.0 }
    pub fn increment(&self) -> Self { Self(self.0.saturating_add(1)) }
    pub fn decrement(&self) -> Self { Self(self.0.saturating_sub(1).max(1)) }
}

impl Default for Quantity { fn default() -> Self { Self::ONE } }

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(500);
        assert_eq!(a.multiply(2).add(Money::new(300)), Money::new(1300));
        let total: Money = vec![Money::new(1), Money::new(2)].into_iter().sum();
        assert_eq!(total.amount(), 3);
    }

    #[test]
    fn test_money_saturates_at_max() {
        assert_eq!(Money::new(u64::MAX).add(Money::new(1)), Money::new(u64::MAX));
        assert_eq!(Money::new(u64::MAX / 2).multiply(3), Money::new(u64::MAX));
    }

    #[test]
    fn test_quantity_bounds() {
        assert_eq!(Quantity::clamped(0).value(), 1);
        assert_eq!(Quantity::clamped(-7).value(), 1);
        assert_eq!(Quantity::clamped(4).value(), 4);
        assert!(Quantity::try_new(0).is_none());
        assert!(Quantity::try_new(-1).is_none());
        assert_eq!(Quantity::try_new(3).map(|q| q.value()), Some(3));
        assert_eq!(Quantity::ONE.decrement(), Quantity::ONE);
        assert_eq!(Quantity::ONE.increment().value(), 2);
    }

    #[test]
    fn test_product_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
