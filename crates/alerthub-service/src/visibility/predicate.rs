//! The visibility predicate.
//!
//! This is the only place scope authorization is decided. The visibility
//! endpoint, the inbox, and client-side filtering of a fetched catalog
//! all call [`resolve`] or [`is_visible`].

use chrono::{DateTime, Utc};

use alerthub_entity::alert::{Alert, VisibilityScope};

use super::viewer::Viewer;

/// Scope authorization alone, ignoring `active` and expiry.
///
/// - `org`: everyone.
/// - `teams`: the viewer's team appears verbatim in `team_ids`.
/// - `users`: the viewer's email matches an entry of `user_emails` ignoring
///   case, or the viewer's id appears in `user_ids`.
/// - unknown scope: nobody.
pub fn can_view(alert: &Alert, viewer: &Viewer) -> bool {
    match alert.scope() {
        Some(VisibilityScope::Org) => true,
        Some(VisibilityScope::Teams) => match (&viewer.team, &alert.team_ids) {
            (Some(team), Some(teams)) => teams.iter().any(|t| t == team),
            _ => false,
        },
        Some(VisibilityScope::Users) => {
            let by_email = match (&viewer.email, &alert.user_emails) {
                (Some(email), Some(emails)) => emails.iter().any(|e| e.to_lowercase() == *email),
                _ => false,
            };
            let by_id = match (viewer.user_id, &alert.user_ids) {
                (Some(id), Some(ids)) => ids.contains(&id),
                _ => false,
            };
            by_email || by_id
        }
        None => false,
    }
}

/// Deliverable as of `now` and authorized for `viewer`.
pub fn is_visible(alert: &Alert, viewer: &Viewer, now: DateTime<Utc>) -> bool {
    alert.is_deliverable_at(now) && can_view(alert, viewer)
}

/// The subset of `alerts` visible to `viewer` at `now`, in input order.
pub fn resolve(alerts: &[Alert], viewer: &Viewer, now: DateTime<Utc>) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|alert| is_visible(alert, viewer, now))
        .cloned()
        .collect()
}
