//! Delivery state and inbox handlers. Every handler acts on the
//! authenticated caller.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use alerthub_entity::delivery::NotificationDelivery;
use alerthub_service::AlertView;

use crate::dto::request::{InboxQuery, MarkReadRequest, SnoozeRequest, parse_severity};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/inbox
pub async fn inbox(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InboxQuery>,
) -> Result<Json<ApiResponse<Vec<AlertView>>>, ApiError> {
    let severity = parse_severity(query.severity.as_deref())?;
    let views = state
        .delivery_service
        .inbox(&auth, query.team.as_deref(), severity)
        .await?;
    Ok(Json(ApiResponse::ok(views)))
}

/// GET /api/deliveries
pub async fn list_deliveries(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<NotificationDelivery>>>, ApiError> {
    let records = state.delivery_service.list_deliveries(&auth).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/alerts/{id}/delivery
///
/// `data` is `null` when the caller has no record for the alert.
pub async fn get_delivery(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<NotificationDelivery>>>, ApiError> {
    let record = state.delivery_service.get_delivery(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/alerts/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<NotificationDelivery>>, ApiError> {
    let record = state.delivery_service.mark_read(&auth, id, req.read).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/alerts/{id}/snooze
pub async fn snooze(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SnoozeRequest>,
) -> Result<Json<ApiResponse<NotificationDelivery>>, ApiError> {
    req.validate()?;
    let record = state
        .delivery_service
        .snooze(&auth, id, req.until, req.utc_offset_minutes)
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}
