//! Viewer role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles recognised by AlertHub.
///
/// Derived per request from the identity provider's `role` claim; never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// May author and manage alerts.
    Admin,
    /// May view alerts and manage their own delivery state.
    #[default]
    Member,
}

impl UserRole {
    /// Map a role claim onto a role, given the claim values that mean admin.
    pub fn from_claim(claim: Option<&str>, admin_roles: &[String]) -> Self {
        match claim {
            Some(role) if admin_roles.iter().any(|r| r == role) => Self::Admin,
            _ => Self::Member,
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claim() {
        let admins = vec!["admin".to_string(), "service_role".to_string()];
        assert_eq!(UserRole::from_claim(Some("admin"), &admins), UserRole::Admin);
        assert_eq!(
            UserRole::from_claim(Some("service_role"), &admins),
            UserRole::Admin
        );
        assert_eq!(
            UserRole::from_claim(Some("authenticated"), &admins),
            UserRole::Member
        );
        assert_eq!(UserRole::from_claim(None, &admins), UserRole::Member);
    }
}
