//! # Period - Inclusive Date Ranges
//!
//! Every aggregate in Caja is computed over an inclusive calendar-day range.
//! The same type backs ad-hoc report ranges, the dashboard windows, and the
//! Monday-through-Sunday business week that weekly closes freeze.
//!
//! ## Week Derivation
//! ```text
//!   Mon    Tue    Wed    Thu    Fri    Sat    Sun
//!  01-01  01-02  01-03  01-04  01-05  01-06  01-07
//!    ▲             │                           ▲
//!    │             └── week_of(2024-01-03)     │
//!    └──────────── from ──────────── to ───────┘
//! ```
//!
//! `week_of` subtracts the weekday offset (Monday = 0) to find the Monday,
//! then adds six days for the Sunday. Both endpoints are inclusive, so a
//! sale recorded 23:59 Sunday still belongs to the closing week.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An inclusive range of calendar days.
///
/// Invariant: `from <= to`. The constructors either guarantee it or reject
/// the input, so downstream SQL can bind both endpoints without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    /// Creates a period, rejecting inverted ranges.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvalidPeriod { from, to });
        }
        Ok(Period { from, to })
    }

    /// A one-day period (used for "today" dashboards and reports).
    pub fn single_day(day: NaiveDate) -> Self {
        Period { from: day, to: day }
    }

    /// The Monday..Sunday business week containing `day`.
    pub fn week_of(day: NaiveDate) -> Self {
        let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
        Period {
            from: monday,
            to: monday + Duration::days(6),
        }
    }

    /// Monday of the current week through `today` (the "this week" preset).
    pub fn week_to_date(today: NaiveDate) -> Self {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Period {
            from: monday,
            to: today,
        }
    }

    /// First of the month through `today` (the "this month" preset).
    pub fn month_to_date(today: NaiveDate) -> Self {
        Period {
            // with_day(1) is always valid for an existing date
            from: today.with_day(1).unwrap_or(today),
            to: today,
        }
    }

    /// True when `day` falls inside the range, endpoints included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

// =============================================================================
// Tests
// =============================================================================
