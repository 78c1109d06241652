//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use alerthub_core::result::AppResult;
use alerthub_entity::alert::{Alert, AlertDraft, Severity};
use alerthub_entity::delivery::NotificationDelivery;

/// Optional narrowing of the admin alert listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Only alerts of this severity.
    pub severity: Option<Severity>,
    /// Only alerts with this active flag.
    pub active: Option<bool>,
}

impl AlertFilter {
    /// Whether `alert` passes the filter.
    pub fn matches(&self, alert: &Alert) -> bool {
        self.severity
            .map(|s| alert.severity == s.as_str())
            .unwrap_or(true)
            && self.active.map(|a| alert.active == a).unwrap_or(true)
    }
}

/// The alert catalog. Mutated only by admin operations.
#[async_trait]
pub trait AlertStore: Send + Sync + std::fmt::Debug + 'static {
    /// All alerts matching `filter`, newest first.
    async fn list(&self, filter: &AlertFilter) -> AppResult<Vec<Alert>>;

    /// Active, unexpired alerts as of `now`, oldest first.
    async fn list_deliverable(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>>;

    /// Find an alert by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>>;

    /// Insert a new alert.
    async fn create(&self, draft: &AlertDraft, now: DateTime<Utc>) -> AppResult<Alert>;

    /// Overwrite the writable fields of an alert. `None` if it does not exist.
    async fn update(
        &self,
        id: Uuid,
        draft: &AlertDraft,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>>;

    /// Flip only the active flag. `None` if the alert does not exist.
    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>>;

    /// Delete an alert and its delivery records. Returns `true` if deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Per-user, per-alert delivery state.
///
/// Both upserts must be atomic per `(user_id, alert_id)` and may only
/// write the fields they own; see [`NotificationDelivery`]. Writing state
/// for an alert that does not exist fails with `NotFound`.
#[async_trait]
pub trait DeliveryStore: Send + Sync + std::fmt::Debug + 'static {
    /// The record for one pair, if any.
    async fn get(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<Option<NotificationDelivery>>;

    /// All records belonging to one user.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<NotificationDelivery>>;

    /// Create or update the read flag of one pair.
    async fn upsert_read(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        read: bool,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery>;

    /// Create or update the snooze deadline of one pair.
    async fn upsert_snooze(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery>;
}
