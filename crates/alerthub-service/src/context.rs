//! Request context carrying the verified caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use alerthub_core::error::AppError;
use alerthub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified token claims by the API layer and passed into
/// service methods. Delivery operations always act on `user_id`; no
/// caller-supplied id is ever used for delivery rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The verified email, lower-cased.
    pub email: Option<String>,
    /// Role resolved from the token's role claim.
    pub role: UserRole,
    /// When the request was received. Used as "now" throughout.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid, email: Option<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
            role,
            request_time: Utc::now(),
        }
    }

    /// Context for operator tooling acting outside any user session.
    pub fn system() -> Self {
        Self::new(Uuid::nil(), None, UserRole::Admin)
    }

    /// Replace the request time.
    pub fn at(mut self, request_time: DateTime<Utc>) -> Self {
        self.request_time = request_time;
        self
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin role required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        let ctx = RequestContext::new(Uuid::new_v4(), Some(" Ana@Example.com".into()), UserRole::Member);
        assert_eq!(ctx.email.as_deref(), Some("ana@example.com"));
        let blank = RequestContext::new(Uuid::new_v4(), Some("  ".into()), UserRole::Member);
        assert_eq!(blank.email, None);
    }

    #[test]
    fn test_require_admin() {
        assert!(RequestContext::system().require_admin().is_ok());
        let member = RequestContext::new(Uuid::new_v4(), None, UserRole::Member);
        assert!(member.require_admin().is_err());
    }
}
