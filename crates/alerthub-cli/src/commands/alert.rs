//! Alert catalog CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use alerthub_core::config::AppConfig;
use alerthub_core::error::AppError;
use alerthub_database::{AlertFilter, Stores};
use alerthub_entity::alert::{Alert, Severity};
use alerthub_service::visibility::{Viewer, resolve};
use alerthub_service::{RequestContext, Services};

/// Arguments for alert commands
#[derive(Debug, Args)]
pub struct AlertArgs {
    /// Alert subcommand
    #[command(subcommand)]
    pub command: AlertCommand,
}

/// Alert subcommands
#[derive(Debug, Subcommand)]
pub enum AlertCommand {
    /// List alerts, newest first
    List {
        /// Filter by severity
        #[arg(short, long)]
        severity: Option<String>,
        /// Show only active (true) or inactive (false) alerts
        #[arg(short, long)]
        active: Option<bool>,
    },
    /// Insert the org-wide test alert
    Seed,
    /// Delete an alert and its delivery records
    Delete {
        /// Alert ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Show which alerts a viewer would currently see
    Visible {
        /// Viewer email
        #[arg(long)]
        email: Option<String>,
        /// Viewer team
        #[arg(long)]
        team: Option<String>,
        /// Viewer user id
        #[arg(long)]
        uid: Option<Uuid>,
    },
}

/// Alert display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AlertRow {
    /// Alert ID
    id: String,
    /// Title
    title: String,
    /// Severity
    severity: String,
    /// Visibility scope
    scope: String,
    /// Recipients for team/user scopes
    recipients: String,
    /// Active flag
    active: bool,
    /// Expiry
    expires_at: String,
}

impl From<&Alert> for AlertRow {
    fn from(a: &Alert) -> Self {
        let recipients: Vec<String> = a
            .team_ids
            .iter()
            .flatten()
            .cloned()
            .chain(a.user_emails.iter().flatten().cloned())
            .chain(a.user_ids.iter().flatten().map(Uuid::to_string))
            .collect();
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            severity: a.severity.clone(),
            scope: a.visibility_scope.clone(),
            recipients: recipients.join(", "),
            active: a.active,
            expires_at: a
                .expires_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute alert commands
pub async fn execute(args: &AlertArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let stores = Stores::open(&config.database).await?;
    let services = Services::new(&stores, &config.alerts);
    let ctx = RequestContext::system();

    match &args.command {
        AlertCommand::List { severity, active } => {
            let filter = AlertFilter {
                severity: severity.as_deref().map(str::parse::<Severity>).transpose()?,
                active: *active,
            };
            let alerts = services.alerts.list(&ctx, filter).await?;
            print_alerts(&alerts, format);
        }
        AlertCommand::Seed => {
            let alert = services.alerts.seed_test_alert(&ctx).await?;
            output::print_success("Seeded test alert.");
            output::print_kv("ID", &alert.id.to_string());
            output::print_kv("Title", &alert.title);
        }
        AlertCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete alert {id} and all of its delivery records?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            services.alerts.delete(&ctx, *id).await?;
            output::print_success(&format!("Alert {id} deleted."));
        }
        AlertCommand::Visible { email, team, uid } => {
            let catalog = services.alerts.list(&ctx, AlertFilter::default()).await?;
            let viewer = Viewer::new(*uid, email.as_deref(), team.as_deref());
            let visible = visible_in_catalog(catalog, &viewer, ctx.request_time);
            print_alerts(&visible, format);
        }
    }

    Ok(())
}

/// Filter the admin catalog (newest first) for `viewer`, returning the
/// result oldest first like `GET /api/alerts/visible`.
fn visible_in_catalog(mut catalog: Vec<Alert>, viewer: &Viewer, now: DateTime<Utc>) -> Vec<Alert> {
    catalog.reverse();
    resolve(&catalog, viewer, now)
}

fn print_alerts(alerts: &[Alert], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(alerts).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn org_alert(title: &str, minute: u32) -> Alert {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap();
        Alert {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message: "body".to_string(),
            severity: "info".to_string(),
            visibility_scope: "org".to_string(),
            team_ids: None,
            user_emails: None,
            user_ids: None,
            reminder_frequency_hours: 2,
            expires_at: None,
            active: true,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_visible_is_oldest_first() {
        let newest_first = vec![org_alert("third", 3), org_alert("second", 2), org_alert("first", 1)];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let titles: Vec<String> = visible_in_catalog(newest_first, &Viewer::anonymous(), now)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
