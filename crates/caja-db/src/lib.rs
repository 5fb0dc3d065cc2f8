//! # Caja DB
//!
//! SQLite persistence layer. All SQL in the workspace lives in this crate;
//! callers above it speak in `caja-core` types and never see a row.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        caja-db                              │
//! │                                                             │
//! │  pool.rs          DbConfig + Database (pool, accessors)     │
//! │  migrations.rs    Embedded schema migrations                │
//! │  error.rs         DbError + sqlx error mapping              │
//! │  repository/                                                │
//! │    user.rs        usuarios: seed owner, lookups             │
//! │    product.rs     productos: catalog CRUD                   │
//! │    sale.rs        ventas: insert, listings, locked delete   │
//! │    expense.rs     gastos: insert, listings, locked delete   │
//! │    close.rs       cierres_semanales: close ledger, locks    │
//! │    report.rs      read-only aggregates across tables        │
//! │  bin/seed.rs      demo data generator                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conventions
//! - Primary keys are UUID v4 strings generated here, not in SQLite.
//! - Money columns are integer cents; conversion to `Money` happens at the
//!   repository boundary.
//! - Timestamps are stored as UTC `'YYYY-MM-DD HH:MM:SS'` TEXT so SQLite's
//!   `date()` and `strftime()` can slice them by calendar day.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// Re-export the main types at crate root for convenient imports
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::close::CloseRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
pub use repository::DeleteOutcome;
