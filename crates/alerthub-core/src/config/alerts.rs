//! Alert visibility and delivery configuration.

use serde::{Deserialize, Serialize};

/// Alert behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Reminder cadence applied when an alert is created without one.
    #[serde(default = "default_reminder_hours")]
    pub default_reminder_frequency_hours: i32,
    /// Upper bound for a single backing store round trip, in milliseconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_ms: u64,
    /// UTC offset used for "snooze today" when the caller sends none.
    #[serde(default)]
    pub default_utc_offset_minutes: i32,
    /// Accept `email`/`uid` query parameters from anonymous callers of the
    /// visibility query. Off by default: those are then taken only from
    /// the verified session.
    #[serde(default)]
    pub trust_query_identity: bool,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            default_reminder_frequency_hours: default_reminder_hours(),
            store_timeout_ms: default_store_timeout(),
            default_utc_offset_minutes: 0,
            trust_query_identity: false,
        }
    }
}

fn default_reminder_hours() -> i32 {
    2
}

fn default_store_timeout() -> u64 {
    5000
}
