//! Alert joined with the viewer's delivery state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use alerthub_entity::alert::Alert;
use alerthub_entity::delivery::NotificationDelivery;

/// What a viewer's inbox shows for one alert. Computed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertView {
    /// The alert itself.
    #[serde(flatten)]
    pub alert: Alert,
    /// Whether the viewer has read it.
    pub read: bool,
    /// When it was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Stored snooze deadline, past or future.
    pub snoozed_until: Option<DateTime<Utc>>,
    /// Suppressed right now.
    pub snoozed_now: bool,
    /// When to prompt again; only for unread, unsnoozed alerts.
    pub next_reminder_due: Option<DateTime<Utc>>,
    /// Past its expiry.
    pub expired: bool,
}

impl AlertView {
    /// Combine an alert with the viewer's record for it, if any.
    pub fn derive(alert: Alert, delivery: Option<&NotificationDelivery>, now: DateTime<Utc>) -> Self {
        let read = delivery.map(|d| d.read).unwrap_or(false);
        let snoozed_now = delivery.map(|d| d.is_snoozed_at(now)).unwrap_or(false);
        let next_reminder_due = (!read && !snoozed_now).then(|| alert.next_reminder_after(now));
        Self {
            read,
            read_at: delivery.and_then(|d| d.read_at),
            snoozed_until: delivery.and_then(|d| d.snoozed_until),
            snoozed_now,
            next_reminder_due,
            expired: alert.is_expired_at(now),
            alert,
        }
    }
}
