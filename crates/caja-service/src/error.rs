//! # Service Errors
//!
//! [`ServiceError`] is what every operation returns on failure. It folds
//! the lower layers' errors in via `#[from]` and adds the refusals that
//! only exist at this level: locked periods and already-closed weeks.
//!
//! The distinction matters for callers: `Auth` and `Validation` are the
//! caller's fault, `PeriodLocked` / `WeekAlreadyClosed` are business
//! refusals to render politely, and `Db` is a real fault to log.

use chrono::NaiveDate;
use thiserror::Error;

use caja_core::{AuthError, ValidationError};
use caja_db::DbError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller's role does not allow the operation.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Input failed validation before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The product has recorded sales; history outlives the catalog.
    #[error("product {0} has recorded sales and cannot be deleted")]
    ProductInUse(String),

    #[error("sale not found: {0}")]
    SaleNotFound(String),

    #[error("expense not found: {0}")]
    ExpenseNotFound(String),

    /// The row's date lies inside a closed week; the ledger is frozen.
    #[error("{entity} dated {date} is inside a closed week and cannot be deleted")]
    PeriodLocked {
        entity: &'static str,
        date: NaiveDate,
    },

    /// The current week already has a ledger row.
    #[error("the week starting {week_start} is already closed")]
    WeekAlreadyClosed { week_start: NaiveDate },

    /// Anything the database layer could not handle.
    #[error(transparent)]
    Db(#[from] DbError),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_messages_carry_the_dates() {
        let err = ServiceError::PeriodLocked {
            entity: "sale",
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "sale dated 2024-01-03 is inside a closed week and cannot be deleted"
        );

        let err = ServiceError::WeekAlreadyClosed {
            week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "the week starting 2024-01-01 is already closed");
    }

    #[test]
    fn lower_layer_errors_convert_via_from() {
        let auth: ServiceError = AuthError::InsufficientRole {
            required: caja_core::Role::Owner,
            actual: caja_core::Role::Operator,
        }
        .into();
        assert!(matches!(auth, ServiceError::Auth(_)));

        let db: ServiceError = DbError::not_found("product", "p-1").into();
        assert!(matches!(db, ServiceError::Db(_)));
    }
}
