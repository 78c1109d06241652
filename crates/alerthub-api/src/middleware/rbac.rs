//! Admin route guard.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use alerthub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Rejects requests whose caller is not an admin.
pub async fn require_admin(auth: AuthUser, request: Request, next: Next) -> Result<Response, ApiError> {
    if !auth.is_admin() {
        tracing::debug!(user_id = %auth.user_id, "Rejected non-admin request");
        return Err(AppError::forbidden("Admin access required").into());
    }
    Ok(next.run(request).await)
}
