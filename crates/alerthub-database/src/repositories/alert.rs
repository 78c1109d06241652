//! Alert repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use alerthub_core::result::AppResult;
use alerthub_entity::alert::{Alert, AlertDraft};

use crate::error::map_sqlx_error;
use crate::store::{AlertFilter, AlertStore};

/// Repository for the `alerts` table.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Create a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for AlertRepository {
    async fn list(&self, filter: &AlertFilter) -> AppResult<Vec<Alert>> {
        sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts \
             WHERE ($1::text IS NULL OR severity = $1) \
               AND ($2::boolean IS NULL OR active = $2) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(filter.severity.map(|s| s.as_str()))
        .bind(filter.active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list alerts", e))
    }

    async fn list_deliverable(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts \
             WHERE active = TRUE AND (expires_at IS NULL OR expires_at > $1) \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list deliverable alerts", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find alert", e))
    }

    async fn create(&self, draft: &AlertDraft, now: DateTime<Utc>) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            "INSERT INTO alerts (id, title, message, severity, visibility_scope, team_ids, \
             user_emails, user_ids, reminder_frequency_hours, expires_at, active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&draft.title)
        .bind(&draft.message)
        .bind(draft.severity.as_str())
        .bind(draft.visibility_scope.as_str())
        .bind(&draft.team_ids)
        .bind(&draft.user_emails)
        .bind(&draft.user_ids)
        .bind(draft.reminder_frequency_hours)
        .bind(draft.expires_at)
        .bind(draft.active)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create alert", e))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &AlertDraft,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>(
            "UPDATE alerts SET title = $2, message = $3, severity = $4, visibility_scope = $5, \
             team_ids = $6, user_emails = $7, user_ids = $8, reminder_frequency_hours = $9, \
             expires_at = $10, active = $11, updated_at = $12 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.message)
        .bind(draft.severity.as_str())
        .bind(draft.visibility_scope.as_str())
        .bind(&draft.team_ids)
        .bind(&draft.user_emails)
        .bind(&draft.user_ids)
        .bind(draft.reminder_frequency_hours)
        .bind(draft.expires_at)
        .bind(draft.active)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update alert", e))
    }

    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>(
            "UPDATE alerts SET active = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to toggle alert", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete alert", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| map_sqlx_error("Health check failed", e))
    }
}
