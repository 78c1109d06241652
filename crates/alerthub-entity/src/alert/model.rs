//! Alert entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::scope::VisibilityScope;
use super::severity::Severity;

/// An announcement authored by an admin.
///
/// `severity` and `visibility_scope` are kept as the raw stored strings;
/// use [`Alert::severity`] and [`Alert::scope`] for the typed values. A
/// scope that does not parse is treated as visible to nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Alert {
    /// Unique alert identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// One of `info`, `warning`, `critical`.
    pub severity: String,
    /// One of `org`, `teams`, `users`.
    pub visibility_scope: String,
    /// Team names, meaningful only for the `teams` scope.
    pub team_ids: Option<Vec<String>>,
    /// Lower-cased recipient emails, meaningful only for the `users` scope.
    pub user_emails: Option<Vec<String>>,
    /// Recipient user ids, meaningful only for the `users` scope.
    pub user_ids: Option<Vec<Uuid>>,
    /// Advisory cadence for re-prompting an unread alert.
    pub reminder_frequency_hours: i32,
    /// Moment after which the alert is no longer deliverable.
    pub expires_at: Option<DateTime<Utc>>,
    /// Soft on/off switch, independent of expiry.
    pub active: bool,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
    /// When the alert was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Alert {
    /// Parsed severity, if the stored value is known.
    pub fn severity(&self) -> Option<Severity> {
        self.severity.parse().ok()
    }

    /// Parsed visibility scope, if the stored value is known.
    pub fn scope(&self) -> Option<VisibilityScope> {
        self.visibility_scope.parse().ok()
    }

    /// Check if the alert has expired as of `now`.
    ///
    /// An alert expiring exactly at `now` counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    /// Active and not expired as of `now`.
    pub fn is_deliverable_at(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired_at(now)
    }

    /// When the viewer should next be prompted about this alert.
    pub fn next_reminder_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::hours(i64::from(self.reminder_frequency_hours.max(1)))
    }
}
