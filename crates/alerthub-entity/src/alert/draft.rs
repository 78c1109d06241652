//! Writable alert fields, for create and partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use alerthub_core::error::AppError;

use super::model::Alert;
use super::scope::VisibilityScope;
use super::severity::Severity;

/// Every admin-writable field of an alert.
///
/// Stores persist a draft as-is; normalization and validation happen in
/// the service layer before a draft reaches a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDraft {
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Visibility scope.
    pub visibility_scope: VisibilityScope,
    /// Team names for the `teams` scope.
    pub team_ids: Option<Vec<String>>,
    /// Emails for the `users` scope.
    pub user_emails: Option<Vec<String>>,
    /// User ids for the `users` scope.
    pub user_ids: Option<Vec<Uuid>>,
    /// Reminder cadence in hours.
    pub reminder_frequency_hours: i32,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Active flag.
    pub active: bool,
}

impl TryFrom<&Alert> for AlertDraft {
    type Error = AppError;

    fn try_from(alert: &Alert) -> Result<Self, Self::Error> {
        Ok(Self {
            title: alert.title.clone(),
            message: alert.message.clone(),
            severity: alert.severity.parse()?,
            visibility_scope: alert.visibility_scope.parse()?,
            team_ids: alert.team_ids.clone(),
            user_emails: alert.user_emails.clone(),
            user_ids: alert.user_ids.clone(),
            reminder_frequency_hours: alert.reminder_frequency_hours,
            expires_at: alert.expires_at,
            active: alert.active,
        })
    }
}

/// A partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertPatch {
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub message: Option<String>,
    /// New severity.
    pub severity: Option<Severity>,
    /// New scope.
    pub visibility_scope: Option<VisibilityScope>,
    /// New team list, or clear.
    pub team_ids: Option<Option<Vec<String>>>,
    /// New email list, or clear.
    pub user_emails: Option<Option<Vec<String>>>,
    /// New user id list, or clear.
    pub user_ids: Option<Option<Vec<Uuid>>>,
    /// New reminder cadence.
    pub reminder_frequency_hours: Option<i32>,
    /// New expiry, or clear.
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// New active flag.
    pub active: Option<bool>,
}

impl AlertPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the patch onto an existing draft.
    pub fn apply(self, mut draft: AlertDraft) -> AlertDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(message) = self.message {
            draft.message = message;
        }
        if let Some(severity) = self.severity {
            draft.severity = severity;
        }
        if let Some(scope) = self.visibility_scope {
            draft.visibility_scope = scope;
        }
        if let Some(team_ids) = self.team_ids {
            draft.team_ids = team_ids;
        }
        if let Some(user_emails) = self.user_emails {
            draft.user_emails = user_emails;
        }
        if let Some(user_ids) = self.user_ids {
            draft.user_ids = user_ids;
        }
        if let Some(hours) = self.reminder_frequency_hours {
            draft.reminder_frequency_hours = hours;
        }
        if let Some(expires_at) = self.expires_at {
            draft.expires_at = expires_at;
        }
        if let Some(active) = self.active {
            draft.active = active;
        }
        draft
    }
}
