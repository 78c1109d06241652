//! Development token issuing.
//!
//! Signs tokens with the configured identity-provider secret so a local
//! server can be exercised without the real provider.

use chrono::Duration;
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::output;
use alerthub_auth::JwtEncoder;
use alerthub_core::config::AppConfig;
use alerthub_core::error::AppError;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a bearer token
    Issue {
        /// Subject user id; random when omitted
        #[arg(long)]
        sub: Option<Uuid>,
        /// Email claim
        #[arg(long)]
        email: Option<String>,
        /// Role claim
        #[arg(long)]
        role: Option<String>,
        /// Lifetime in minutes
        #[arg(long, default_value_t = 60)]
        ttl_minutes: i64,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            sub,
            email,
            role,
            ttl_minutes,
        } => {
            if *ttl_minutes < 1 {
                return Err(AppError::invalid_field("ttl_minutes", "must be at least 1"));
            }
            let user_id = sub.unwrap_or_else(Uuid::new_v4);
            let token = JwtEncoder::new(&config.auth).issue(
                user_id,
                email.as_deref(),
                role.as_deref(),
                Duration::minutes(*ttl_minutes),
            )?;

            output::print_kv("Subject", &user_id.to_string());
            output::print_kv("Expires in", &format!("{ttl_minutes} minutes"));
            println!("{token}");
        }
    }
    Ok(())
}
