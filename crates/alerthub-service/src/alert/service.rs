//! Alert CRUD for administrators.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use alerthub_core::error::AppError;
use alerthub_core::result::AppResult;
use alerthub_database::{AlertFilter, AlertStore};
use alerthub_entity::alert::{Alert, AlertDraft, AlertPatch, Severity, VisibilityScope};

use super::validation::normalize_draft;
use crate::context::RequestContext;
use crate::deadline::within;

/// Input for creating an alert. Omitted optional fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
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
    /// Reminder cadence; the configured default when omitted.
    pub reminder_frequency_hours: Option<i32>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Active flag; `true` when omitted.
    pub active: Option<bool>,
}

/// Manages the alert catalog.
#[derive(Debug, Clone)]
pub struct AlertService {
    /// Alert store.
    store: Arc<dyn AlertStore>,
    /// Reminder cadence for alerts created without one.
    default_reminder_hours: i32,
    /// Bound on each store round trip.
    store_timeout: Duration,
}

impl AlertService {
    /// Creates a new alert service.
    pub fn new(store: Arc<dyn AlertStore>, default_reminder_hours: i32, store_timeout: Duration) -> Self {
        Self {
            store,
            default_reminder_hours,
            store_timeout,
        }
    }

    /// Lists alerts, newest first.
    pub async fn list(&self, ctx: &RequestContext, filter: AlertFilter) -> AppResult<Vec<Alert>> {
        ctx.require_admin()?;
        within(self.store_timeout, self.store.list(&filter)).await
    }

    /// Gets one alert.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Alert> {
        ctx.require_admin()?;
        self.find(id).await
    }

    /// Creates an alert.
    pub async fn create(&self, ctx: &RequestContext, input: NewAlert) -> AppResult<Alert> {
        ctx.require_admin()?;
        let draft = normalize_draft(AlertDraft {
            title: input.title,
            message: input.message,
            severity: input.severity,
            visibility_scope: input.visibility_scope,
            team_ids: input.team_ids,
            user_emails: input.user_emails,
            user_ids: input.user_ids,
            reminder_frequency_hours: input
                .reminder_frequency_hours
                .unwrap_or(self.default_reminder_hours),
            expires_at: input.expires_at,
            active: input.active.unwrap_or(true),
        })?;

        let alert = within(self.store_timeout, self.store.create(&draft, ctx.request_time)).await?;

        info!(
            alert_id = %alert.id,
            severity = %alert.severity,
            scope = %alert.visibility_scope,
            actor = %ctx.user_id,
            "Alert created"
        );
        Ok(alert)
    }

    /// Applies a partial update. An empty patch returns the alert unchanged.
    pub async fn update(&self, ctx: &RequestContext, id: Uuid, patch: AlertPatch) -> AppResult<Alert> {
        ctx.require_admin()?;
        let existing = self.find(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let draft = normalize_draft(patch.apply(AlertDraft::try_from(&existing)?))?;
        let alert = within(
            self.store_timeout,
            self.store.update(id, &draft, ctx.request_time),
        )
        .await?
        .ok_or_else(|| not_found(id))?;

        info!(alert_id = %id, actor = %ctx.user_id, "Alert updated");
        Ok(alert)
    }

    /// Turns an alert on or off without touching any other field.
    pub async fn set_active(&self, ctx: &RequestContext, id: Uuid, active: bool) -> AppResult<Alert> {
        ctx.require_admin()?;
        let alert = within(
            self.store_timeout,
            self.store.set_active(id, active, ctx.request_time),
        )
        .await?
        .ok_or_else(|| not_found(id))?;

        info!(alert_id = %id, active, actor = %ctx.user_id, "Alert active flag changed");
        Ok(alert)
    }

    /// Deletes an alert and every delivery record that refers to it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        if !within(self.store_timeout, self.store.delete(id)).await? {
            return Err(not_found(id));
        }
        info!(alert_id = %id, actor = %ctx.user_id, "Alert deleted");
        Ok(())
    }

    /// Inserts the org-wide test alert used to check a fresh deployment.
    pub async fn seed_test_alert(&self, ctx: &RequestContext) -> AppResult<Alert> {
        self.create(
            ctx,
            NewAlert {
                title: "Test Org Alert".to_string(),
                message: "This is a test organization-wide alert.".to_string(),
                severity: Severity::Info,
                visibility_scope: VisibilityScope::Org,
                team_ids: None,
                user_emails: None,
                user_ids: None,
                reminder_frequency_hours: Some(2),
                expires_at: None,
                active: Some(true),
            },
        )
        .await
    }

    /// Store health check.
    pub async fn health_check(&self) -> AppResult<bool> {
        within(self.store_timeout, self.store.health_check()).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Alert> {
        within(self.store_timeout, self.store.find_by_id(id))
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Alert {id} not found"))
}
