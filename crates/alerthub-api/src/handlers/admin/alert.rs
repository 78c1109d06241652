//! Alert catalog management.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use alerthub_database::AlertFilter;
use alerthub_entity::alert::{Alert, AlertPatch};
use alerthub_service::NewAlert;

use crate::dto::request::{
    AdminAlertsQuery, CreateAlertRequest, SetActiveRequest, UpdateAlertRequest, parse_severity,
};
use crate::dto::response::{ApiResponse, DeletedResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AdminAlertsQuery>,
) -> Result<Json<ApiResponse<Vec<Alert>>>, ApiError> {
    let filter = AlertFilter {
        severity: parse_severity(query.severity.as_deref())?,
        active: query.active,
    };
    let alerts = state.alert_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(alerts)))
}

/// POST /api/admin/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Alert>>), ApiError> {
    req.validate()?;
    let alert = state
        .alert_service
        .create(&auth, NewAlert::try_from(req)?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(alert))))
}

/// GET /api/admin/alerts/{id}
pub async fn get_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Alert>>, ApiError> {
    let alert = state.alert_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(alert)))
}

/// PATCH /api/admin/alerts/{id}
pub async fn update_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAlertRequest>,
) -> Result<Json<ApiResponse<Alert>>, ApiError> {
    req.validate()?;
    let alert = state
        .alert_service
        .update(&auth, id, AlertPatch::try_from(req)?)
        .await?;
    Ok(Json(ApiResponse::ok(alert)))
}

/// PUT /api/admin/alerts/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<Alert>>, ApiError> {
    let alert = state.alert_service.set_active(&auth, id, req.active).await?;
    Ok(Json(ApiResponse::ok(alert)))
}

/// DELETE /api/admin/alerts/{id}
pub async fn delete_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.alert_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { id, deleted: true })))
}
