//! CLI command definitions and dispatch.

pub mod audit;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use chedreg_core::config::AppConfig;
use chedreg_core::error::AppError;
use chedreg_database::DatabasePool;

use crate::output::OutputFormat;

/// chedreg: request activity audit trail tooling
#[derive(Debug, Parser)]
#[command(name = "chedreg", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}.toml` over the defaults)
    #[arg(short, long, default_value = "development")]
    pub env: String,

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
    /// Audit trail search and export
    Audit(audit::AuditArgs),
    /// Access token utilities
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        tracing::debug!(env = %self.env, "Configuration loaded");
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Audit(args) => audit::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format),
        }
    }
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
