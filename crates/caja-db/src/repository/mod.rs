//! # Repositories
//!
//! One repository per table, each a thin struct over the shared pool.
//! Repositories translate between SQLite rows and `caja-core` types and
//! own every piece of SQL; no query strings exist outside this module.
//!
//! ## Date handling
//! Sale timestamps are stored as `'YYYY-MM-DD HH:MM:SS'` UTC TEXT and
//! bound/parsed explicitly through the helpers below, so the stored text is
//! exactly what SQLite's `date()` and `strftime()` slice up. Calendar dates
//! (`NaiveDate`) bind directly; their ISO form needs no help.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

pub mod close;
pub mod expense;
pub mod product;
pub mod report;
pub mod sale;
pub mod user;

/// Storage format for UTC timestamps.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generates a fresh UUID v4 primary key.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Formats a UTC timestamp into its storage form.
pub(crate) fn format_datetime(ts: DateTime<Utc>) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Parses a stored timestamp back into UTC.
pub(crate) fn parse_datetime(raw: &str) -> DbResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DbError::invalid_data(format!("bad timestamp {raw:?}: {e}")))
}

/// Result of a lock-checked delete.
///
/// Deletion is refused, not failed, when the row's date falls inside a
/// closed week; the caller decides whether that is an error. See
/// [`sale::SaleRepository::delete_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row existed outside any closed week and is gone.
    Deleted,
    /// The row's date lies inside a closed week; nothing was deleted.
    Locked { date: NaiveDate },
    /// No row had that id.
    NotFound,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_round_trips_through_storage_form() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 3, 10, 30, 0).unwrap();
        let stored = format_datetime(ts);
        assert_eq!(stored, "2024-01-03 10:30:00");
        assert_eq!(parse_datetime(&stored).unwrap(), ts);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_datetime("not a date"),
            Err(DbError::InvalidData(_))
        ));
        // ISO 'T' separator is not the storage form
        assert!(parse_datetime("2024-01-03T10:30:00").is_err());
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
