//! # Money - Integer Cents Arithmetic
//!
//! All amounts in Caja are integer cents wrapped in [`Money`]. Floats are
//! banned for money: `0.1 + 0.2 != 0.3` in IEEE 754, and a ledger that
//! drifts by a cent per thousand rows is worse than useless at close time.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  $4.50 unit price  ──►  Money(450)                       │
//! │  3 units sold      ──►  Money(450) * 3 = Money(1350)     │
//! │  week profit       ──►  sales - expenses (exact, i64)    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The wrapped value is a signed `i64`: totals are non-negative in practice,
//! but profit (sales minus expenses) can legitimately go below zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// An amount of money in integer cents.
///
/// Serializes as a bare integer (`1350`, not `{"cents": 1350}`), so report
/// payloads stay flat and renderers divide by 100 themselves if they want
/// decimal display.
///
/// ## Example
/// ```
/// use caja_core::Money;
///
/// let price = Money::from_cents(450);
/// let total = price.multiply_quantity(3);
/// assert_eq!(total.cents(), 1350);
/// assert_eq!(total.to_string(), "$13.50");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from integer cents.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Zero amount.
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the raw cent count.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity of units.
    ///
    /// Named method rather than bare `*` at call sites that record sales,
    /// so the "total = price x quantity, frozen at sale time" rule is
    /// visible where it matters.
    pub const fn multiply_quantity(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    /// Formats as `$12.34`, negatives as `-$0.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_round_trips() {
        assert_eq!(Money::from_cents(1234).cents(), 1234);
        assert_eq!(Money::from_cents(-50).cents(), -50);
        assert_eq!(Money::zero().cents(), 0);
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Money::from_cents(10);
        let b = Money::from_cents(20);
        assert_eq!((a + b).cents(), 30);
        assert_eq!((a - b).cents(), -10);
        assert_eq!((b * 3).cents(), 60);
        assert_eq!((-a).cents(), -10);

        let mut acc = Money::zero();
        acc += Money::from_cents(450);
        acc += Money::from_cents(450);
        acc -= Money::from_cents(100);
        assert_eq!(acc.cents(), 800);
    }

    #[test]
    fn multiply_quantity_freezes_line_total() {
        let unit = Money::from_cents(450);
        assert_eq!(unit.multiply_quantity(3).cents(), 1350);
        assert_eq!(unit.multiply_quantity(0).cents(), 0);
    }

    #[test]
    fn sum_over_iterator() {
        let parts = vec![
            Money::from_cents(100),
            Money::from_cents(250),
            Money::from_cents(5),
        ];
        let total: Money = parts.into_iter().sum();
        assert_eq!(total.cents(), 355);
    }

    #[test]
    fn predicates() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(1).is_zero());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn display_formatting() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-50).to_string(), "-$0.50");
        assert_eq!(Money::from_cents(100000).to_string(), "$1000.00");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(1350)).unwrap();
        assert_eq!(json, "1350");

        let back: Money = serde_json::from_str("1350").unwrap();
        assert_eq!(back, Money::from_cents(1350));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}
