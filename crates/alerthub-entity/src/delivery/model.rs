//! Notification delivery entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read/snooze state of one alert for one user.
///
/// Keyed by `(user_id, alert_id)`. A missing record means unread and not
/// snoozed. Each mutation owns exactly one group of fields: read-marking
/// owns `read`/`read_at`, snoozing owns `snoozed_until`. Neither may touch
/// the other's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationDelivery {
    /// The user this state belongs to.
    pub user_id: Uuid,
    /// The alert this state refers to.
    pub alert_id: Uuid,
    /// Whether the user has read the alert.
    pub read: bool,
    /// When the alert was first marked read; `None` while unread.
    pub read_at: Option<DateTime<Utc>>,
    /// Suppressed from active attention until this moment.
    pub snoozed_until: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl NotificationDelivery {
    /// A fresh record: unread, not snoozed.
    pub fn new(user_id: Uuid, alert_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            alert_id,
            read: false,
            read_at: None,
            snoozed_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the read flag.
    ///
    /// `read_at` is stamped on the unread → read transition and kept when
    /// the record is already read, so repeating the call is a no-op.
    /// Marking unread clears it. `snoozed_until` is left alone.
    pub fn apply_read(&mut self, read: bool, now: DateTime<Utc>) {
        self.read_at = match (read, self.read) {
            (true, true) => self.read_at.or(Some(now)),
            (true, false) => Some(now),
            (false, _) => None,
        };
        self.read = read;
        self.updated_at = now;
    }

    /// Set the snooze deadline. `read`/`read_at` are left alone.
    pub fn apply_snooze(&mut self, until: DateTime<Utc>, now: DateTime<Utc>) {
        self.snoozed_until = Some(until);
        self.updated_at = now;
    }

    /// Whether the alert is suppressed at `now`.
    pub fn is_snoozed_at(&self, now: DateTime<Utc>) -> bool {
        self.snoozed_until.map(|until| until > now).unwrap_or(false)
    }
}
