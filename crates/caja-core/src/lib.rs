//! # Caja Core
//!
//! Pure business logic for a small-shop sales and expense tracker.
//! No I/O, no async, no database - just types and rules.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     caja-service                            │
//! │            (role-gated operations, I/O)                     │
//! └────────────────────────┬────────────────────────────────────┘
//!                          │ uses
//! ┌────────────────────────┴────────────────────────────────────┐
//! │                       caja-db                               │
//! │              (SQLite repositories, sqlx)                    │
//! └────────────────────────┬────────────────────────────────────┘
//!                          │ uses
//! ┌────────────────────────┴────────────────────────────────────┐
//! │                   THIS CRATE (caja-core)                    │
//! │                                                             │
//! │  money.rs      Integer-cents Money type                     │
//! │  period.rs     Inclusive date ranges, Monday-based weeks    │
//! │  auth.rs       Roles and per-request caller context         │
//! │  types.rs      Domain records (users, products, sales, ...) │
//! │  report.rs     Aggregate totals and report payloads         │
//! │  validation.rs Input checks shared by all entry points      │
//! │  error.rs      Validation and authorization errors          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Rules
//! 1. All money amounts are integer cents (`Money`), never floats.
//! 2. All timestamps are UTC; calendar math uses `NaiveDate`.
//! 3. Weeks run Monday through Sunday, inclusive on both ends.
//! 4. Roles are checked at the top of every operation, not in the UI.

pub mod auth;
pub mod error;
pub mod money;
pub mod period;
pub mod report;
pub mod types;
pub mod validation;

// Re-export the main types at crate root for convenient imports
pub use auth::{RequestContext, Role};
pub use error::{AuthError, ValidationError};
pub use money::Money;
pub use period::Period;
pub use report::{
    DashboardSummary, DayActivity, ExpenseLine, HistoryFilter, PeriodTotals, ReportPayload,
    SaleLine,
};
pub use types::{Expense, ExpenseRecord, Product, Sale, SaleRecord, User, WeeklyClose};
