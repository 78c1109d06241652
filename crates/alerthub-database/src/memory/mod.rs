//! Process-local store.
//!
//! Implements both store traits over shared in-memory state. Delivery
//! writes go through `DashMap::entry`, which holds the shard lock for the
//! `(user_id, alert_id)` key across the read-modify-write, giving the same
//! per-pair atomicity the PostgreSQL upsert provides.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use alerthub_core::error::AppError;
use alerthub_core::result::AppResult;
use alerthub_entity::alert::{Alert, AlertDraft};
use alerthub_entity::delivery::NotificationDelivery;

use crate::store::{AlertFilter, AlertStore, DeliveryStore};

type DeliveryKey = (Uuid, Uuid);

/// In-memory implementation of [`AlertStore`] and [`DeliveryStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Alerts in insertion order.
    alerts: Arc<RwLock<Vec<Alert>>>,
    /// Delivery records keyed by `(user_id, alert_id)`.
    deliveries: Arc<DashMap<DeliveryKey, NotificationDelivery>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update one delivery record.
    ///
    /// The alerts read guard is held until the record is written, so a
    /// concurrent `delete` either runs first (and this fails with
    /// `NotFound`) or waits and then removes the new record.
    async fn write_delivery(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        now: DateTime<Utc>,
        change: impl FnOnce(&mut NotificationDelivery),
    ) -> AppResult<NotificationDelivery> {
        let alerts = self.alerts.read().await;
        if !alerts.iter().any(|a| a.id == alert_id) {
            return Err(AppError::not_found(format!("Alert {alert_id} not found")));
        }
        let mut entry = self
            .deliveries
            .entry((user_id, alert_id))
            .or_insert_with(|| NotificationDelivery::new(user_id, alert_id, now));
        change(entry.value_mut());
        let record = entry.value().clone();
        drop(entry);
        drop(alerts);
        Ok(record)
    }
}

fn build_alert(id: Uuid, draft: &AlertDraft, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Alert {
    Alert {
        id,
        title: draft.title.clone(),
        message: draft.message.clone(),
        severity: draft.severity.as_str().to_string(),
        visibility_scope: draft.visibility_scope.as_str().to_string(),
        team_ids: draft.team_ids.clone(),
        user_emails: draft.user_emails.clone(),
        user_ids: draft.user_ids.clone(),
        reminder_frequency_hours: draft.reminder_frequency_hours,
        expires_at: draft.expires_at,
        active: draft.active,
        created_at,
        updated_at: now,
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn list(&self, filter: &AlertFilter) -> AppResult<Vec<Alert>> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .rev()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn list_deliverable(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .filter(|a| a.is_deliverable_at(now))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>> {
        let alerts = self.alerts.read().await;
        Ok(alerts.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, draft: &AlertDraft, now: DateTime<Utc>) -> AppResult<Alert> {
        let alert = build_alert(Uuid::now_v7(), draft, now, now);
        self.alerts.write().await.push(alert.clone());
        debug!(alert_id = %alert.id, "Stored alert in memory");
        Ok(alert)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &AlertDraft,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>> {
        let mut alerts = self.alerts.write().await;
        Ok(alerts.iter_mut().find(|a| a.id == id).map(|slot| {
            *slot = build_alert(id, draft, slot.created_at, now);
            slot.clone()
        }))
    }

    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>> {
        let mut alerts = self.alerts.write().await;
        Ok(alerts.iter_mut().find(|a| a.id == id).map(|slot| {
            slot.active = active;
            slot.updated_at = now;
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        let deleted = alerts.len() < before;
        if deleted {
            self.deliveries.retain(|(_, alert_id), _| *alert_id != id);
        }
        Ok(deleted)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl DeliveryStore for MemoryStore {
    async fn get(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<Option<NotificationDelivery>> {
        Ok(self
            .deliveries
            .get(&(user_id, alert_id))
            .map(|entry| entry.value().clone()))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<NotificationDelivery>> {
        let mut records: Vec<NotificationDelivery> = self
            .deliveries
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|d| (d.created_at, d.alert_id));
        Ok(records)
    }

    async fn upsert_read(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        read: bool,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery> {
        self.write_delivery(user_id, alert_id, now, |d| d.apply_read(read, now))
            .await
    }

    async fn upsert_snooze(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery> {
        self.write_delivery(user_id, alert_id, now, |d| d.apply_snooze(until, now))
            .await
    }
}
