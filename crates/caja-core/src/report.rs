//! # Report Shapes
//!
//! Everything the aggregation engine produces lives here: period totals,
//! detail lines, the assembled report payload, dashboard windows and the
//! calendar's per-day cells.
//!
//! ## Payload Contract
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ ReportPayload (serialized)                                   │
//! │ {                                                            │
//! │   "period":         { "from": date, "to": date },            │
//! │   "sales_total":    cents,                                   │
//! │   "expenses_total": cents,                                   │
//! │   "profit":         cents,   // always sales - expenses      │
//! │   "sales_detail":   [ {product, quantity, total, date, user} ],
//! │   "expenses_detail":[ {description, amount, date, user} ]    │
//! │ }                                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Renderers (HTML table, PDF, spreadsheet export) all consume this one
//! shape; none of them get to recompute totals. `profit` is derived in
//! exactly one place: [`PeriodTotals::profit`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::period::Period;

/// Sales and expense sums over some period.
///
/// Sums over zero matching rows are zero, not null/missing, so an empty
/// week still closes and an empty report still renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub sales_total: Money,
    pub expenses_total: Money,
}

impl PeriodTotals {
    pub fn new(sales_total: Money, expenses_total: Money) -> Self {
        PeriodTotals {
            sales_total,
            expenses_total,
        }
    }

    /// The single definition of profit in the codebase.
    pub fn profit(&self) -> Money {
        self.sales_total - self.expenses_total
    }
}

/// One sale row in a report or history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product: String,
    pub quantity: i64,
    pub total: Money,
    pub date: DateTime<Utc>,
    pub user: String,
}

/// One expense row in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub user: String,
}

/// The full report handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub period: Period,
    pub sales_total: Money,
    pub expenses_total: Money,
    pub profit: Money,
    pub sales_detail: Vec<SaleLine>,
    pub expenses_detail: Vec<ExpenseLine>,
}

impl ReportPayload {
    /// Assembles a payload from totals and detail rows.
    ///
    /// `profit` is filled in from [`PeriodTotals::profit`]; callers never
    /// pass it, so a payload with inconsistent totals cannot be built.
    pub fn new(
        period: Period,
        totals: PeriodTotals,
        sales_detail: Vec<SaleLine>,
        expenses_detail: Vec<ExpenseLine>,
    ) -> Self {
        ReportPayload {
            period,
            sales_total: totals.sales_total,
            expenses_total: totals.expenses_total,
            profit: totals.profit(),
            sales_detail,
            expenses_detail,
        }
    }
}

/// Optional filters for the sales history search. `None` means "don't
/// filter on this"; text filters match as case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub period: Option<Period>,
    pub product: Option<String>,
    pub user: Option<String>,
}

/// One day's cell on the activity calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub sales_total: Money,
    pub expenses_total: Money,
}

/// The four windows the home dashboard shows side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub lifetime: PeriodTotals,
    pub today: PeriodTotals,
    pub last_7_days: PeriodTotals,
    pub last_30_days: PeriodTotals,
}

// =============================================================================
// Tests
// =============================================================================
