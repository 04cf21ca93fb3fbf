//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role definitions

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// User roles in the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, can manage settings and pricing.
    Admin,
    /// Manages staff, inventory, and the sales pipeline.
    Manager,
    /// Operates the sales pipeline and inventory.
    Staff,
    /// External travel agent with read access and own quotes.
    Agent,
}

impl UserRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::Agent => "agent",
        }
    }

    /// Parses a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "staff" => Some(Self::Staff),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }

    /// Returns true if this role can modify application settings and pricing.
    #[must_use]
    pub const fn can_modify_settings(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role can manage inventory and the sales pipeline.
    #[must_use]
    pub const fn is_back_office(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Staff)
    }

    /// Returns true if this role can manage other users' profiles.
    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_modify_settings());
        assert!(!UserRole::Manager.can_modify_settings());
        assert!(!UserRole::Agent.can_modify_settings());

        assert!(UserRole::Admin.is_back_office());
        assert!(UserRole::Manager.is_back_office());
        assert!(UserRole::Staff.is_back_office());
        assert!(!UserRole::Agent.is_back_office());

        assert!(UserRole::Manager.can_manage_users());
        assert!(!UserRole::Staff.can_manage_users());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Manager,
            UserRole::Staff,
            UserRole::Agent,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }
}
