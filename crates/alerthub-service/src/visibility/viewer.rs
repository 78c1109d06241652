//! Viewer identity attributes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::RequestContext;

/// The identity attributes a visibility decision is made against.
///
/// Every attribute is optional. `email` is stored lower-cased; `team` is
/// kept verbatim because team matching is exact. Blank values are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Stable user id.
    pub user_id: Option<Uuid>,
    /// Email, lower-cased.
    pub email: Option<String>,
    /// Self-declared team name.
    pub team: Option<String>,
}

impl Viewer {
    /// Build a viewer, normalizing the email and dropping blank values.
    pub fn new(user_id: Option<Uuid>, email: Option<&str>, team: Option<&str>) -> Self {
        Self {
            user_id,
            email: email
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
            team: team.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// A viewer with no identity at all. Sees only org-wide alerts.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The session's identity plus a self-declared team.
    pub fn from_context(ctx: &RequestContext, team: Option<&str>) -> Self {
        Self::new(Some(ctx.user_id), ctx.email.as_deref(), team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let v = Viewer::new(None, Some("  A@X.com "), Some(""));
        assert_eq!(v.email.as_deref(), Some("a@x.com"));
        assert_eq!(v.team, None);

        let v = Viewer::new(None, Some(""), Some("Eng"));
        assert_eq!(v.email, None);
        assert_eq!(v.team.as_deref(), Some("Eng"));
    }
}
