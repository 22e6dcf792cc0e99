//! Access token commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use chedreg_auth::jwt::JwtEncoder;
use chedreg_core::config::AppConfig;
use chedreg_core::error::AppError;

use crate::output::{self, OutputFormat};

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
    /// Issue an access token for a user
    Issue {
        /// User ID (token subject)
        #[arg(short, long)]
        user: Uuid,
    },
}

#[derive(Debug, Serialize)]
struct IssuedToken {
    user_id: Uuid,
    access_token: String,
    expires_at: String,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { user } => {
            let (access_token, expires_at) =
                JwtEncoder::new(&config.auth).issue_access_token(*user)?;

            output::print_item(
                &IssuedToken {
                    user_id: *user,
                    access_token,
                    expires_at: expires_at.to_rfc3339(),
                },
                format,
            );
        }
    }

    Ok(())
}
