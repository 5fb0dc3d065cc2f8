//! # Database Errors
//!
//! [`DbError`] is the only error type repositories return. The interesting
//! part is the `From<sqlx::Error>` impl: SQLite reports constraint failures
//! as stringly-typed database errors, so we sniff the message to recover
//! which constraint fired. Callers match on `Duplicate` / `ForeignKey`
//! instead of parsing strings themselves.

use thiserror::Error;

/// Convenience alias used by every repository method.
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row matched the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A UNIQUE constraint rejected the write. `constraint` carries
    /// SQLite's `table.column` description of which one.
    #[error("duplicate value violates unique constraint: {constraint}")]
    Duplicate { constraint: String },

    /// A FOREIGN KEY constraint rejected the write (referenced row is
    /// missing, or the row is still referenced by others).
    #[error("foreign key constraint failed: {0}")]
    ForeignKey(String),

    /// Pool or connection trouble.
    #[error("database connection error: {0}")]
    Connection(String),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A stored value did not decode into its domain type (bad date text,
    /// unknown role, ...). Indicates a corrupt or hand-edited database.
    #[error("invalid data in database: {0}")]
    InvalidData(String),

    /// Any other query failure.
    #[error("query failed: {0}")]
    Query(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        DbError::InvalidData(msg.into())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("row", "unknown"),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                if let Some(constraint) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::Duplicate {
                        constraint: constraint.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKey(msg)
                } else {
                    DbError::Query(msg)
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DbError::InvalidData(err.to_string())
            }
            sqlx::Error::PoolTimedOut => {
                DbError::Connection("timed out waiting for a connection".to_string())
            }
            sqlx::Error::PoolClosed => DbError::Connection("connection pool is closed".to_string()),
            sqlx::Error::Configuration(e) => DbError::Connection(e.to_string()),
            other => DbError::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = DbError::not_found("product", "p-123");
        assert_eq!(err.to_string(), "product not found: p-123");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn pool_errors_map_to_connection() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::Connection(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::Connection(_)
        ));
    }
}
