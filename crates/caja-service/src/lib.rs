//! # Caja Service Layer
//!
//! Use-case orchestration between the domain core and the database. Every
//! operation takes a [`RequestContext`](caja_core::RequestContext) and
//! enforces its role gate before touching the database, so callers cannot
//! reach a repository without passing authorization.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              THIS CRATE (caja-service)         │
//! │                                                │
//! │  products    sales    expenses    closes       │
//! │  reports            errors                     │
//! └────────────────┬───────────────────────────────┘
//!                  │
//!         ┌────────┴────────┐
//!         ▼                 ▼
//!     caja-core          caja-db
//!   (types, auth,     (pool, repos,
//!    validation)       migrations)
//! ```
//!
//! The services are independent handles over a shared [`caja_db::Database`];
//! construct the ones a caller needs and clone freely.

pub mod closes;
pub mod error;
pub mod expenses;
pub mod products;
pub mod reports;
pub mod sales;

pub use closes::CloseService;
pub use error::{ServiceError, ServiceResult};
pub use expenses::ExpenseService;
pub use products::ProductService;
pub use reports::ReportService;
pub use sales::SaleService;
