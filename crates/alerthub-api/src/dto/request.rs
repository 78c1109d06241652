//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use alerthub_core::error::AppError;
use alerthub_entity::alert::{AlertPatch, Severity, VisibilityScope};
use alerthub_service::NewAlert;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Query of `GET /api/alerts/visible`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibleAlertsQuery {
    /// Viewer email, case-insensitive.
    pub email: Option<String>,
    /// Self-declared team, exact match.
    pub team: Option<String>,
    /// Viewer user id. Blank means absent.
    pub uid: Option<String>,
}

impl VisibleAlertsQuery {
    /// The `uid` parameter as a user id; blank values count as absent.
    pub fn user_id(&self) -> Result<Option<Uuid>, AppError> {
        self.uid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<Uuid>()
                    .map_err(|_| AppError::invalid_field("uid", "must be a UUID"))
            })
            .transpose()
    }
}

/// Query of `GET /api/inbox`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboxQuery {
    /// Self-declared team, exact match.
    pub team: Option<String>,
    /// Only alerts of this severity.
    pub severity: Option<String>,
}

/// Query of `GET /api/admin/alerts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminAlertsQuery {
    /// Only alerts of this severity.
    pub severity: Option<String>,
    /// Only alerts with this active flag.
    pub active: Option<bool>,
}

/// Parse an optional severity query parameter.
pub fn parse_severity(value: Option<&str>) -> Result<Option<Severity>, AppError> {
    value
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

/// Body of `PUT /api/alerts/{id}/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    /// Target read state.
    pub read: bool,
}

/// Body of `PUT /api/alerts/{id}/snooze`. An empty body snoozes until the
/// end of the caller's local day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SnoozeRequest {
    /// Explicit deadline.
    pub until: Option<DateTime<Utc>>,
    /// Caller's UTC offset in minutes, used when `until` is absent.
    #[validate(range(min = -840, max = 840, message = "must be between -840 and 840"))]
    pub utc_offset_minutes: Option<i32>,
}

/// Body of `PUT /api/admin/alerts/{id}/active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    /// New active flag.
    pub active: bool,
}

/// Body of `POST /api/admin/alerts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertRequest {
    /// Short title.
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub title: String,
    /// Body text.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: String,
    /// `info`, `warning`, or `critical`.
    pub severity: String,
    /// `org`, `teams`, or `users`.
    pub visibility_scope: String,
    /// Team names for the `teams` scope.
    #[serde(default)]
    pub team_ids: Option<Vec<String>>,
    /// Emails for the `users` scope.
    #[serde(default)]
    pub user_emails: Option<Vec<String>>,
    /// User ids for the `users` scope.
    #[serde(default)]
    pub user_ids: Option<Vec<Uuid>>,
    /// Reminder cadence in hours.
    #[validate(range(min = 1, message = "must be a positive number of hours"))]
    pub reminder_frequency_hours: Option<i32>,
    /// Optional expiry.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Active flag.
    pub active: Option<bool>,
}

impl TryFrom<CreateAlertRequest> for NewAlert {
    type Error = AppError;

    fn try_from(req: CreateAlertRequest) -> Result<Self, Self::Error> {
        Ok(NewAlert {
            title: req.title,
            message: req.message,
            severity: req.severity.parse()?,
            visibility_scope: req.visibility_scope.parse()?,
            team_ids: req.team_ids,
            user_emails: req.user_emails,
            user_ids: req.user_ids,
            reminder_frequency_hours: req.reminder_frequency_hours,
            expires_at: req.expires_at,
            active: req.active,
        })
    }
}

/// Body of `PATCH /api/admin/alerts/{id}`. Absent fields stay untouched;
/// `null` clears a recipient list or the expiry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAlertRequest {
    /// New title.
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub title: Option<String>,
    /// New body text.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: Option<String>,
    /// New severity.
    pub severity: Option<String>,
    /// New scope.
    pub visibility_scope: Option<String>,
    /// New team list, or `null`.
    #[serde(default, deserialize_with = "double_option")]
    pub team_ids: Option<Option<Vec<String>>>,
    /// New email list, or `null`.
    #[serde(default, deserialize_with = "double_option")]
    pub user_emails: Option<Option<Vec<String>>>,
    /// New user id list, or `null`.
    #[serde(default, deserialize_with = "double_option")]
    pub user_ids: Option<Option<Vec<Uuid>>>,
    /// New reminder cadence.
    #[validate(range(min = 1, message = "must be a positive number of hours"))]
    pub reminder_frequency_hours: Option<i32>,
    /// New expiry, or `null`.
    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// New active flag.
    pub active: Option<bool>,
}

impl TryFrom<UpdateAlertRequest> for AlertPatch {
    type Error = AppError;

    fn try_from(req: UpdateAlertRequest) -> Result<Self, Self::Error> {
        Ok(AlertPatch {
            title: req.title,
            message: req.message,
            severity: req.severity.as_deref().map(str::parse::<Severity>).transpose()?,
            visibility_scope: req
                .visibility_scope
                .as_deref()
                .map(str::parse::<VisibilityScope>)
                .transpose()?,
            team_ids: req.team_ids,
            user_emails: req.user_emails,
            user_ids: req.user_ids,
            reminder_frequency_hours: req.reminder_frequency_hours,
            expires_at: req.expires_at,
            active: req.active,
        })
    }
}
