//! Audit trail CLI commands.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use chedreg_core::config::AppConfig;
use chedreg_core::error::AppError;
use chedreg_service::audit::{AuditQuery, AuditQueryService, AuditView};

use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Filters shared by search and export
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Outcome: failed, warning, info, success
    #[arg(short, long)]
    pub status: Option<String>,
    /// Free-text search term
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search the audit trail
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Results per page (5-100)
        #[arg(long, default_value = "25")]
        per_page: String,
        /// Page number
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// Export matching records to a JSON file
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file path
        #[arg(short, long, default_value = "audit_export.json")]
        output: String,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    id: i64,
    time: String,
    user: String,
    activity: String,
    status: String,
    description: String,
    ip: String,
}

impl From<&AuditView> for AuditRow {
    fn from(view: &AuditView) -> Self {
        Self {
            id: view.id,
            time: view.created_at.clone(),
            user: view.user.name.clone(),
            activity: view.activity.to_string(),
            status: view.status.to_string(),
            description: view.description.clone(),
            ip: view.ip_address.clone().unwrap_or_default(),
        }
    }
}

fn build_query(filters: &FilterArgs, per_page: Option<&str>, page: Option<&str>) -> AuditQuery {
    AuditQuery::from_raw(
        filters.status.as_deref(),
        filters.search.as_deref(),
        filters.from.as_deref(),
        filters.to.as_deref(),
        per_page,
        page,
    )
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let service = AuditQueryService::new(
        Arc::new(db.audit_store()),
        Duration::from_secs(config.audit.query_timeout_seconds),
    );

    match &args.command {
        AuditCommand::Search {
            filters,
            per_page,
            page,
        } => {
            let query = build_query(filters, Some(per_page), Some(page));
            let listing = service.list(&query).await?;

            match format {
                OutputFormat::Json => output::print_item(&listing, format),
                OutputFormat::Table => {
                    let rows: Vec<AuditRow> =
                        listing.logs.items.iter().map(AuditRow::from).collect();
                    output::print_rows(&rows, format);
                    output::print_kv(
                        "Page",
                        &format!("{} of {}", listing.logs.page, listing.logs.total_pages),
                    );
                    output::print_kv("Total", &listing.logs.total_items.to_string());
                }
            }
        }
        AuditCommand::Export {
            filters,
            output: out_path,
        } => {
            let query = build_query(filters, None, None);
            let views = service
                .export(&query, config.audit.export_max_rows)
                .await?;

            let json = serde_json::to_string_pretty(&views)?;
            tokio::fs::write(out_path, json).await?;

            output::print_success(&format!(
                "Exported {} audit records to '{}'",
                views.len(),
                out_path
            ));
        }
    }

    db.close().await;
    Ok(())
}
