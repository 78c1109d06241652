//! Read and snooze state for the calling user.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use alerthub_core::result::AppResult;
use alerthub_database::DeliveryStore;
use alerthub_entity::alert::Severity;
use alerthub_entity::delivery::NotificationDelivery;

use super::schedule::end_of_local_day;
use super::view::AlertView;
use crate::context::RequestContext;
use crate::deadline::within;
use crate::visibility::{Viewer, VisibilityService};

/// Manages delivery records. Every operation acts on `ctx.user_id`.
#[derive(Debug, Clone)]
pub struct DeliveryService {
    /// Delivery store.
    deliveries: Arc<dyn DeliveryStore>,
    /// Used to build the inbox.
    visibility: VisibilityService,
    /// Offset for "snooze today" when the caller sends none.
    default_utc_offset_minutes: i32,
    /// Bound on each store round trip.
    store_timeout: Duration,
}

impl DeliveryService {
    /// Creates a new delivery service.
    pub fn new(
        deliveries: Arc<dyn DeliveryStore>,
        visibility: VisibilityService,
        default_utc_offset_minutes: i32,
        store_timeout: Duration,
    ) -> Self {
        Self {
            deliveries,
            visibility,
            default_utc_offset_minutes,
            store_timeout,
        }
    }

    /// The caller's record for one alert, if any.
    pub async fn get_delivery(
        &self,
        ctx: &RequestContext,
        alert_id: Uuid,
    ) -> AppResult<Option<NotificationDelivery>> {
        within(self.store_timeout, self.deliveries.get(ctx.user_id, alert_id)).await
    }

    /// All of the caller's records.
    pub async fn list_deliveries(&self, ctx: &RequestContext) -> AppResult<Vec<NotificationDelivery>> {
        within(self.store_timeout, self.deliveries.list_for_user(ctx.user_id)).await
    }

    /// Mark an alert read or unread. Leaves any snooze in place.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        alert_id: Uuid,
        read: bool,
    ) -> AppResult<NotificationDelivery> {
        let record = within(
            self.store_timeout,
            self.deliveries
                .upsert_read(ctx.user_id, alert_id, read, ctx.request_time),
        )
        .await?;

        info!(user_id = %ctx.user_id, alert_id = %alert_id, read, "Delivery read state set");
        Ok(record)
    }

    /// Snooze an alert. Leaves the read state in place.
    ///
    /// Without an explicit `until`, the alert is snoozed through the end of
    /// the caller's local day, using `utc_offset_minutes` or the configured
    /// default.
    pub async fn snooze(
        &self,
        ctx: &RequestContext,
        alert_id: Uuid,
        until: Option<DateTime<Utc>>,
        utc_offset_minutes: Option<i32>,
    ) -> AppResult<NotificationDelivery> {
        let until = match until {
            Some(until) => until,
            None => end_of_local_day(
                ctx.request_time,
                utc_offset_minutes.unwrap_or(self.default_utc_offset_minutes),
            )?,
        };

        let record = within(
            self.store_timeout,
            self.deliveries
                .upsert_snooze(ctx.user_id, alert_id, until, ctx.request_time),
        )
        .await?;

        info!(
            user_id = %ctx.user_id,
            alert_id = %alert_id,
            snoozed_until = %until,
            "Delivery snoozed"
        );
        Ok(record)
    }

    /// The caller's visible alerts joined with their delivery state.
    pub async fn inbox(
        &self,
        ctx: &RequestContext,
        team: Option<&str>,
        severity: Option<Severity>,
    ) -> AppResult<Vec<AlertView>> {
        let now = ctx.request_time;
        let viewer = Viewer::from_context(ctx, team);
        let alerts = self.visibility.visible_alerts(&viewer, now).await?;
        let records: HashMap<Uuid, NotificationDelivery> = self
            .list_deliveries(ctx)
            .await?
            .into_iter()
            .map(|d| (d.alert_id, d))
            .collect();

        let views: Vec<AlertView> = alerts
            .into_iter()
            .filter(|a| severity.is_none() || a.severity() == severity)
            .map(|a| {
                let record = records.get(&a.id);
                AlertView::derive(a, record, now)
            })
            .collect();

        debug!(user_id = %ctx.user_id, count = views.len(), "Built inbox");
        Ok(views)
    }
}
