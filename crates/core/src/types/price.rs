//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are plain non-negative decimal amounts in the store currency.
//! Multi-currency support is deliberately absent: the catalog authority
//! prices everything in one currency and the storefront only sums and
//! displays.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative decimal price in the store currency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price, used for unresolvable cart lines.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply this unit price by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Price {
    /// Format for display (e.g. "$19.99").
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
