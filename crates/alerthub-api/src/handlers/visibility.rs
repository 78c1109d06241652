//! Visibility query handler.

use axum::Json;
use axum::extract::{Query, State};

use alerthub_core::error::AppError;
use alerthub_entity::alert::Alert;
use alerthub_service::context::RequestContext;
use alerthub_service::visibility::Viewer;

use crate::dto::request::VisibleAlertsQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// GET /api/alerts/visible
pub async fn visible_alerts(
    State(state): State<AppState>,
    MaybeAuthUser(ctx): MaybeAuthUser,
    Query(query): Query<VisibleAlertsQuery>,
) -> Result<Json<ApiResponse<Vec<Alert>>>, ApiError> {
    let viewer = viewer_for(ctx.as_ref(), &query, state.config.alerts.trust_query_identity)?;
    let now = ctx
        .as_ref()
        .map(|c| c.request_time)
        .unwrap_or_else(chrono::Utc::now);
    let alerts = state.visibility_service.visible_alerts(&viewer, now).await?;
    Ok(Json(ApiResponse::ok(alerts)))
}

/// Decide which identity the query is answered for.
///
/// A signed-in caller is always answered as themselves; `email`/`uid`
/// parameters must match the session. Anonymous callers may pass them
/// only when `trust_query_identity` is set. `team` is self-declared.
pub fn viewer_for(
    ctx: Option<&RequestContext>,
    query: &VisibleAlertsQuery,
    trust_query_identity: bool,
) -> Result<Viewer, AppError> {
    let query_email = query
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let query_uid = query.user_id()?;

    match ctx {
        Some(ctx) => {
            if query_email.is_some() && query_email != ctx.email {
                return Err(AppError::forbidden("email does not match the signed-in user"));
            }
            if query_uid.is_some_and(|uid| uid != ctx.user_id) {
                return Err(AppError::forbidden("uid does not match the signed-in user"));
            }
            Ok(Viewer::from_context(ctx, query.team.as_deref()))
        }
        None => {
            if !trust_query_identity && (query_email.is_some() || query_uid.is_some()) {
                return Err(AppError::unauthorized(
                    "Querying by email or uid requires a signed-in user",
                ));
            }
            Ok(Viewer::new(query_uid, query_email.as_deref(), query.team.as_deref()))
        }
    }
}
