//! # Roles and Request Context
//!
//! Caja has exactly two roles. The owner runs the shop; operators ring up
//! sales and log expenses. Every operation takes a [`RequestContext`] and
//! checks the role itself as its first statement, so authorization lives
//! next to the behavior it protects instead of in routing tables.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  Capability                        owner      operator     │
//! │  ─────────────────────────────────────────────────────     │
//! │  record sale / expense               ✓           ✓         │
//! │  list own sales / expenses           ✓           ✓         │
//! │  list everyone's rows                ✓           ✗         │
//! │  manage products                     ✓           ✗         │
//! │  delete sale / expense               ✓           ✗         │
//! │  close week, reports, history        ✓           ✗         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Owner strictly outranks operator: any check an operator passes, the
//! owner passes too.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthError;

/// User role, stored in the database as `'owner'` / `'operator'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Operator,
}

impl Role {
    /// The database representation of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Operator => "operator",
        }
    }

    /// Parses the database representation back into a role.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "owner" => Some(Role::Owner),
            "operator" => Some(Role::Operator),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller of an operation.
///
/// Built by whatever outer layer handles login, then threaded through every
/// service call. Carries just enough to gate operations and attribute rows:
/// the user's id (foreign key on sales and expenses), display name, and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>, role: Role) -> Self {
        RequestContext {
            user_id: user_id.into(),
            user_name: user_name.into(),
            role,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    /// Gate for owner-only operations.
    pub fn require_owner(&self) -> Result<(), AuthError> {
        match self.role {
            Role::Owner => Ok(()),
            actual => Err(AuthError::InsufficientRole {
                required: Role::Owner,
                actual,
            }),
        }
    }

    /// Gate for day-to-day operations.
    ///
    /// Every current role passes, since owner outranks operator. The gate
    /// stays explicit so all operations read uniformly and a future role
    /// that should NOT record sales fails closed here.
    pub fn require_operator(&self) -> Result<(), AuthError> {
        match self.role {
            Role::Owner | Role::Operator => Ok(()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> RequestContext {
        RequestContext::new("u-1", "Dora", Role::Owner)
    }

    fn operator() -> RequestContext {
        RequestContext::new("u-2", "Maria", Role::Operator)
    }

    #[test]
    fn owner_passes_both_gates() {
        assert!(owner().require_owner().is_ok());
        assert!(owner().require_operator().is_ok());
        assert!(owner().is_owner());
    }

    #[test]
    fn operator_fails_the_owner_gate() {
        let err = operator().require_owner().unwrap_err();
        assert_eq!(
            err,
            AuthError::InsufficientRole {
                required: Role::Owner,
                actual: Role::Operator,
            }
        );
        assert!(!operator().is_owner());
    }

    #[test]
    fn operator_passes_the_operator_gate() {
        assert!(operator().require_operator().is_ok());
    }

    #[test]
    fn role_round_trips_through_db_strings() {
        assert_eq!(Role::parse("owner"), Some(Role::Owner));
        assert_eq!(Role::parse("operator"), Some(Role::Operator));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Owner.as_str(), "owner");
        assert_eq!(Role::Operator.as_str(), "operator");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"operator\"").unwrap(),
            Role::Operator
        );
    }
}
