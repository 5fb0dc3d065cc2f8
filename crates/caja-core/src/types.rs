//! # Domain Types
//!
//! Rust-side rows for the five tables: users, products, sales, expenses and
//! weekly closes, plus the joined records the listing screens show.
//!
//! Money fields follow the `*_cents: i64` storage convention with a
//! [`Money`] accessor next to each, so the database layer binds plain
//! integers while business code gets arithmetic-safe values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::money::Money;
use crate::period::Period;

/// An application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Kept for deactivating former staff without breaking the foreign
    /// keys on their historical sales and expenses.
    pub is_active: bool,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Informational stock count; sales do not decrement it.
    pub stock: i64,
}

impl Product {
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A recorded sale.
///
/// `total_cents` is `quantity * unit price` captured at sale time. Editing
/// the product's price later must not change this row, so the total is
/// stored, never recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub total_cents: i64,
    /// UTC timestamp of the sale. Its calendar date is what week locks
    /// and period aggregates look at.
    pub recorded_at: DateTime<Utc>,
    pub user_id: String,
}

impl Sale {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A recorded expense. Dated by calendar day, not timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub user_id: String,
}

impl Expense {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// One row of the weekly close ledger.
///
/// The three totals are snapshots frozen at close time. Sales or expenses
/// deleted afterwards (there should be none, the lock forbids it) would not
/// rewrite these numbers, and neither does re-running any aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyClose {
    pub id: String,
    /// Monday of the closed week.
    pub week_start: NaiveDate,
    /// Sunday of the closed week (`week_start + 6 days`).
    pub week_end: NaiveDate,
    pub sales_total_cents: i64,
    pub expenses_total_cents: i64,
    /// `sales_total_cents - expenses_total_cents`, stored so the ledger is
    /// self-contained. Can be negative.
    pub profit_cents: i64,
    /// Id of the owner who ran the close.
    pub closed_by: String,
    /// UTC timestamp of when the close ran.
    pub closed_at: DateTime<Utc>,
}

impl WeeklyClose {
    pub fn sales_total(&self) -> Money {
        Money::from_cents(self.sales_total_cents)
    }

    pub fn expenses_total(&self) -> Money {
        Money::from_cents(self.expenses_total_cents)
    }

    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }

    /// The locked week as a period.
    pub fn week(&self) -> Period {
        Period {
            from: self.week_start,
            to: self.week_end,
        }
    }
}

/// A sale joined with product and user names, as the listing screens and
/// delete confirmations need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub product: String,
    pub quantity: i64,
    pub total_cents: i64,
    pub recorded_at: DateTime<Utc>,
    pub user: String,
}

impl SaleRecord {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// An expense joined with the recording user's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub user: String,
}

impl ExpenseRecord {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn money_accessors_wrap_the_cent_fields() {
        let product = Product {
            id: "p-1".into(),
            name: "Widget".into(),
            price_cents: 450,
            stock: 10,
        };
        assert_eq!(product.price(), Money::from_cents(450));
    }

    #[test]
    fn weekly_close_exposes_its_week_as_a_period() {
        let close = WeeklyClose {
            id: "c-1".into(),
            week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            week_end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            sales_total_cents: 5000,
            expenses_total_cents: 2000,
            profit_cents: 3000,
            closed_by: "u-1".into(),
            closed_at: Utc::now(),
        };
        let week = close.week();
        assert!(week.contains(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
        assert!(!week.contains(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));
        assert_eq!(close.profit(), Money::from_cents(3000));
    }
}
