//! The acting principal.
//!
//! Authentication happens upstream; by the time a command is built the caller
//! is reduced to a plain value of identity and role. Nothing in the inventory
//! core inspects it.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Role of an authenticated user.
///
/// Ordered by privilege so `role >= Role::Manager` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Day-to-day sales staff.
    Staff = 0,
    /// Can restock, cancel sales, and maintain the catalog.
    Manager = 1,
    /// Full access.
    Admin = 2,
}

impl Role {
    /// Parse a role from a string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "staff" => Some(Self::Staff),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user acting on the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Who is acting.
    pub user_id: UserId,
    /// What they are allowed to do.
    pub role: Role,
}

impl Principal {
    /// Creates a principal.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns true if the principal holds `role` or a more privileged one.
    #[must_use]
    pub fn has_at_least(&self, role: Role) -> bool {
        self.role >= role
    }
}
