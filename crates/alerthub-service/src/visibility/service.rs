//! Visibility queries against the alert store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use alerthub_core::result::AppResult;
use alerthub_database::AlertStore;
use alerthub_entity::alert::Alert;

use super::predicate::resolve;
use super::viewer::Viewer;
use crate::deadline::within;

/// Resolves the alerts a viewer may currently see.
#[derive(Debug, Clone)]
pub struct VisibilityService {
    /// Alert store.
    alerts: Arc<dyn AlertStore>,
    /// Bound on each store round trip.
    store_timeout: Duration,
}

impl VisibilityService {
    /// Creates a new visibility service.
    pub fn new(alerts: Arc<dyn AlertStore>, store_timeout: Duration) -> Self {
        Self {
            alerts,
            store_timeout,
        }
    }

    /// Alerts visible to `viewer` at `now`, oldest first.
    pub async fn visible_alerts(&self, viewer: &Viewer, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let catalog = within(self.store_timeout, self.alerts.list_deliverable(now)).await?;
        let visible = resolve(&catalog, viewer, now);
        debug!(
            deliverable = catalog.len(),
            visible = visible.len(),
            has_email = viewer.email.is_some(),
            has_team = viewer.team.is_some(),
            "Resolved visible alerts"
        );
        Ok(visible)
    }
}
