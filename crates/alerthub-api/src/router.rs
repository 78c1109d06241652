//! Route definitions for the AlertHub HTTP API.
//!
//! All routes are mounted under `/api`. Admin routes sit behind the
//! [`require_admin`](crate::middleware::rbac::require_admin) guard.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, request logging, and the
/// request timeout.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(viewer_routes())
        .merge(admin_routes(state.clone()));

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness and store health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Visibility query, inbox, and the caller's own delivery state
fn viewer_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts/visible", get(handlers::visibility::visible_alerts))
        .route("/inbox", get(handlers::delivery::inbox))
        .route("/deliveries", get(handlers::delivery::list_deliveries))
        .route("/alerts/{id}/delivery", get(handlers::delivery::get_delivery))
        .route("/alerts/{id}/read", put(handlers::delivery::mark_read))
        .route("/alerts/{id}/snooze", put(handlers::delivery::snooze))
}

/// Alert catalog management
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/alerts",
            get(handlers::admin::alert::list_alerts).post(handlers::admin::alert::create_alert),
        )
        .route(
            "/admin/alerts/{id}",
            get(handlers::admin::alert::get_alert)
                .patch(handlers::admin::alert::update_alert)
                .delete(handlers::admin::alert::delete_alert),
        )
        .route("/admin/alerts/{id}/active", put(handlers::admin::alert::set_active))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::rbac::require_admin,
        ))
}
