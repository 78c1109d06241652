//! Notification delivery repository implementation.
//!
//! Each mutation is a single `INSERT ... ON CONFLICT DO UPDATE` that only
//! assigns the columns the operation owns, so PostgreSQL serializes
//! concurrent writers to the same `(user_id, alert_id)` row without an
//! application-side read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use alerthub_core::result::AppResult;
use alerthub_entity::delivery::NotificationDelivery;

use crate::error::map_sqlx_error;
use crate::store::DeliveryStore;

/// Repository for the `notification_deliveries` table.
#[derive(Debug, Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    /// Create a new delivery repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryStore for DeliveryRepository {
    async fn get(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<Option<NotificationDelivery>> {
        sqlx::query_as::<_, NotificationDelivery>(
            "SELECT * FROM notification_deliveries WHERE user_id = $1 AND alert_id = $2",
        )
        .bind(user_id)
        .bind(alert_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to get delivery", e))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<NotificationDelivery>> {
        sqlx::query_as::<_, NotificationDelivery>(
            "SELECT * FROM notification_deliveries WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list deliveries", e))
    }

    async fn upsert_read(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        read: bool,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery> {
        // read_at keeps its first stamp while the row stays read.
        sqlx::query_as::<_, NotificationDelivery>(
            "INSERT INTO notification_deliveries AS d \
                 (user_id, alert_id, read, read_at, created_at, updated_at) \
             VALUES ($1, $2, $3, CASE WHEN $3 THEN $4 ELSE NULL END, $4, $4) \
             ON CONFLICT (user_id, alert_id) DO UPDATE SET \
                 read = EXCLUDED.read, \
                 read_at = CASE \
                     WHEN NOT EXCLUDED.read THEN NULL \
                     WHEN d.read THEN COALESCE(d.read_at, EXCLUDED.read_at) \
                     ELSE EXCLUDED.read_at \
                 END, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(user_id)
        .bind(alert_id)
        .bind(read)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to mark alert read", e))
    }

    async fn upsert_snooze(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<NotificationDelivery> {
        sqlx::query_as::<_, NotificationDelivery>(
            "INSERT INTO notification_deliveries AS d \
                 (user_id, alert_id, snoozed_until, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (user_id, alert_id) DO UPDATE SET \
                 snoozed_until = EXCLUDED.snoozed_until, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(user_id)
        .bind(alert_id)
        .bind(until)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to snooze alert", e))
    }
}
