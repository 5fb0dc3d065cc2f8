//! # Core Errors
//!
//! Two error families live here:
//!
//! - [`ValidationError`]: the input failed a shape or range check before any
//!   I/O happened. Callers can surface the message directly to the user.
//! - [`AuthError`]: the caller's role does not allow the operation. Raised
//!   by [`crate::auth::RequestContext`] at the top of each operation.
//!
//! Database and service failures have their own enums in the crates that
//! own them; this crate stays free of I/O error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::auth::Role;

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A numeric field must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    /// A numeric field must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: &'static str },

    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A field failed to parse (bad month number, malformed date, ...).
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    /// A period's start date came after its end date.
    #[error("period start {from} is after period end {to}")]
    InvalidPeriod { from: NaiveDate, to: NaiveDate },
}

/// Authorization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The caller's role is not allowed to perform the operation.
    #[error("{required} role required, caller is {actual}")]
    InsufficientRole { required: Role, actual: Role },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "description",
            max: 500,
        };
        assert_eq!(err.to_string(), "description must be at most 500 characters");

        let err = ValidationError::MustBePositive { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must be greater than zero");
    }

    #[test]
    fn auth_message_names_both_roles() {
        let err = AuthError::InsufficientRole {
            required: Role::Owner,
            actual: Role::Operator,
        };
        assert_eq!(err.to_string(), "owner role required, caller is operator");
    }
}
