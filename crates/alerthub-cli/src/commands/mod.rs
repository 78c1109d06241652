//! CLI command definitions and dispatch.

pub mod alert;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use alerthub_core::config::AppConfig;
use alerthub_core::error::AppError;

/// AlertHub administration
#[derive(Debug, Parser)]
#[command(name = "alerthub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Alert catalog management
    Alert(alert::AlertArgs),
    /// Development token issuing
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Alert(args) => alert::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let path = config_path.strip_suffix(".toml").unwrap_or(config_path);
    AppConfig::load_file(path)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {e}")))
}
