//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use alerthub_auth::JwtDecoder;
use alerthub_core::config::AppConfig;
use alerthub_database::Stores;
use alerthub_service::{AlertService, DeliveryService, Services, VisibilityService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Admin alert management
    pub alert_service: Arc<AlertService>,
    /// Visibility queries
    pub visibility_service: Arc<VisibilityService>,
    /// Delivery state and inbox
    pub delivery_service: Arc<DeliveryService>,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: &Stores) -> Self {
        let services = Services::new(stores, &config.alerts);
        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            alert_service: Arc::new(services.alerts),
            visibility_service: Arc::new(services.visibility),
            delivery_service: Arc::new(services.deliveries),
            config: Arc::new(config),
        }
    }
}
