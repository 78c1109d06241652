//! Alert field rules, applied before any write.

use validator::ValidateEmail;

use alerthub_core::error::AppError;
use alerthub_entity::alert::{AlertDraft, VisibilityScope};

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Normalize a draft and check it, returning the value to persist.
///
/// Titles are trimmed, emails lower-cased, team names trimmed, and
/// duplicates dropped. Empty recipient lists are treated as absent. The
/// recipient lists must agree with the scope: `teams` carries only
/// `team_ids`, `users` carries only `user_emails`/`user_ids`, and `org`
/// carries none.
pub fn normalize_draft(mut draft: AlertDraft) -> Result<AlertDraft, AppError> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(AppError::invalid_field("title", "must not be empty"));
    }
    if draft.title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::invalid_field(
            "title",
            format!("must be at most {MAX_TITLE_CHARS} characters"),
        ));
    }
    if draft.message.trim().is_empty() {
        return Err(AppError::invalid_field("message", "must not be empty"));
    }
    if draft.reminder_frequency_hours < 1 {
        return Err(AppError::invalid_field(
            "reminder_frequency_hours",
            "must be a positive number of hours",
        ));
    }

    draft.team_ids = normalize_teams(draft.team_ids.take())?;
    draft.user_emails = normalize_emails(draft.user_emails.take())?;
    draft.user_ids = draft.user_ids.take().and_then(|ids| {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        non_empty(unique)
    });

    match draft.visibility_scope {
        VisibilityScope::Org => {
            forbid(draft.team_ids.is_some(), "team_ids", "org")?;
            forbid(draft.user_emails.is_some(), "user_emails", "org")?;
            forbid(draft.user_ids.is_some(), "user_ids", "org")?;
        }
        VisibilityScope::Teams => {
            if draft.team_ids.is_none() {
                return Err(AppError::invalid_field(
                    "team_ids",
                    "at least one team is required for the teams scope",
                ));
            }
            forbid(draft.user_emails.is_some(), "user_emails", "teams")?;
            forbid(draft.user_ids.is_some(), "user_ids", "teams")?;
        }
        VisibilityScope::Users => {
            if draft.user_emails.is_none() && draft.user_ids.is_none() {
                return Err(AppError::invalid_field(
                    "user_emails",
                    "at least one email or user id is required for the users scope",
                ));
            }
            forbid(draft.team_ids.is_some(), "team_ids", "users")?;
        }
    }

    Ok(draft)
}

fn forbid(present: bool, field: &str, scope: &str) -> Result<(), AppError> {
    if present {
        Err(AppError::invalid_field(
            field,
            format!("must be null for the {scope} scope"),
        ))
    } else {
        Ok(())
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn normalize_teams(teams: Option<Vec<String>>) -> Result<Option<Vec<String>>, AppError> {
    let Some(teams) = teams else {
        return Ok(None);
    };
    let mut out: Vec<String> = Vec::with_capacity(teams.len());
    for team in teams {
        let team = team.trim();
        if team.is_empty() {
            return Err(AppError::invalid_field("team_ids", "team names must not be blank"));
        }
        if !out.iter().any(|t| t == team) {
            out.push(team.to_string());
        }
    }
    Ok(non_empty(out))
}

fn normalize_emails(emails: Option<Vec<String>>) -> Result<Option<Vec<String>>, AppError> {
    let Some(emails) = emails else {
        return Ok(None);
    };
    let mut out: Vec<String> = Vec::with_capacity(emails.len());
    for email in emails {
        let email = email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(AppError::invalid_field(
                "user_emails",
                format!("'{email}' is not a valid email address"),
            ));
        }
        if !out.contains(&email) {
            out.push(email);
        }
    }
    Ok(non_empty(out))
}
