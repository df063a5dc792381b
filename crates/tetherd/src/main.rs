//! Tether Agent daemon.
//!
//! Resolves the managing server's identity and organization branding on
//! startup, then holds the process open for the remote-control transport.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use tether_common::agent_config::ConfigStore;
use tetherd::conductor::Conductor;
use tetherd::device_init::DeviceInitService;

#[derive(Parser)]
#[command(name = "tetherd")]
#[command(about = "Tether remote support agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Managing server base URL, when already known
    #[arg(long)]
    host: Option<String>,

    /// Organization the agent belongs to
    #[arg(long)]
    organization_id: Option<String>,

    /// Path to the agent config file (defaults to the user config location)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    info!("Tether Agent v{} starting", env!("CARGO_PKG_VERSION"));

    let conductor = Arc::new(Conductor::from_args(cli.host, cli.organization_id));
    let config_store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    };

    let init_service = DeviceInitService::new(conductor, config_store);
    init_service.resolve_init().await;

    match init_service.branding_info().await {
        Some(branding) => info!(
            product = branding.product.as_deref().unwrap_or("unknown"),
            "Organization branding resolved"
        ),
        None => info!("No organization branding resolved; using defaults"),
    }

    info!("Tether Agent ready");

    // Keep running (remote-control transport attaches here)
    tokio::signal::ctrl_c().await?;
    info!("Shutting down gracefully");

    Ok(())
}
