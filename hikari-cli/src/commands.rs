//! CLI command implementations

use std::path::PathBuf;

use clap::Subcommand;
use hikari_core::catalog::{self, LoadStatus};
use hikari_core::config::DeliveryPolicy;
use hikari_core::tracing_setup::{LogLevel, init_tracing};
use hikari_core::{HikariConfig, HikariError};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the catalog API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to the catalog document
        #[arg(long)]
        data: Option<PathBuf>,
        /// Content delivery policy
        #[arg(long, value_enum)]
        policy: Option<DeliveryPolicy>,
        /// Console log level
        #[arg(long, default_value = "info")]
        log_level: LogLevel,
    },
    /// Validate the catalog document and print the load report
    Check {
        /// Path to the catalog document
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> hikari_core::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            data,
            policy,
            log_level,
        } => serve(host, port, data, policy, log_level).await,
        Commands::Check { data } => check(data),
    }
}

/// Start the API server. Flags override `HIKARI_*` environment variables,
/// which override defaults.
async fn serve(
    host: Option<String>,
    port: Option<u16>,
    data: Option<PathBuf>,
    policy: Option<DeliveryPolicy>,
    log_level: LogLevel,
) -> hikari_core::Result<()> {
    init_tracing(log_level.as_tracing_level(), None)?;

    let mut config = HikariConfig::from_env();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(data) = data {
        config.catalog.data_path = Some(data);
    }
    if let Some(policy) = policy {
        config.delivery.policy = policy;
    }

    hikari_web::run_server(config).await
}

/// Load the catalog once and report the outcome without serving.
///
/// # Errors
/// - `HikariError::Configuration` - the dataset failed to load cleanly
fn check(data: Option<PathBuf>) -> hikari_core::Result<()> {
    let candidates = catalog::candidate_paths(data.as_deref());
    let (index, report) = catalog::load_catalog(&candidates);

    println!("status:  {:?}", report.status);
    println!("entries: {}", index.len());
    if let Some(detail) = &report.detail {
        println!("detail:  {detail}");
    }

    match report.status {
        LoadStatus::Ok => Ok(()),
        _ => Err(HikariError::Configuration {
            reason: format!("catalog failed to load: {:?}", report.status),
        }),
    }
}
