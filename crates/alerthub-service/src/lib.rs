//! # alerthub-service
//!
//! Business logic for AlertHub. Services receive their store handles at
//! construction time and are cheap to clone.
//!
//! The visibility predicate lives in [`visibility`] as pure functions; the
//! HTTP query, the inbox, and the CLI all go through it.

pub mod alert;
pub mod context;
pub mod delivery;
pub mod visibility;

mod deadline;

use std::time::Duration;

use alerthub_core::config::AlertsConfig;
use alerthub_database::Stores;

pub use alert::{AlertService, NewAlert};
pub use context::RequestContext;
pub use delivery::{AlertView, DeliveryService};
pub use visibility::{Viewer, VisibilityService};

/// All services, wired to one set of stores.
#[derive(Debug, Clone)]
pub struct Services {
    /// Admin alert management.
    pub alerts: AlertService,
    /// Visibility queries.
    pub visibility: VisibilityService,
    /// Per-user delivery state and the inbox.
    pub deliveries: DeliveryService,
}

impl Services {
    /// Build every service over `stores`.
    pub fn new(stores: &Stores, config: &AlertsConfig) -> Self {
        let limit = Duration::from_millis(config.store_timeout_ms);
        let visibility = VisibilityService::new(stores.alerts.clone(), limit);
        Self {
            alerts: AlertService::new(
                stores.alerts.clone(),
                config.default_reminder_frequency_hours,
                limit,
            ),
            deliveries: DeliveryService::new(
                stores.deliveries.clone(),
                visibility.clone(),
                config.default_utc_offset_minutes,
                limit,
            ),
            visibility,
        }
    }
}
