//! # ERP Node
//!
//! Entry point for the purchase posting services.
//!
//! ```text
//! erp-node --database-url postgres://erp@localhost/erp --bind 0.0.0.0:8080
//! erp-node --demo
//! ```

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use erp_node::{NodeConfig, NodeRuntime};
use erp_01_purchase_posting::LedgerConnectionConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "erp-node", version, about = "Purchase posting gateway and resource API")]
struct Args {
    /// Address to serve the HTTP API on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// PostgreSQL ledger connection string
    #[arg(long)]
    database_url: Option<String>,

    /// Use an in-memory ledger instead of a database
    #[arg(long)]
    demo: bool,
}

/// Environment first, flags override.
fn load_config(args: Args) -> Result<NodeConfig> {
    let mut config = NodeConfig::from_env().context("Failed to read configuration from environment")?;

    if let Some(bind) = args.bind {
        config.api.host = bind.ip();
        config.api.port = bind.port();
    }
    if let Some(database_url) = args.database_url {
        let ledger = config.ledger.take().unwrap_or_default();
        config.ledger = Some(LedgerConnectionConfig { database_url, ..ledger });
    }
    if args.demo {
        config.demo = true;
    }
    if config.demo {
        config.ledger = None;
    }

    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Initiating graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(Args::parse())?;

    let _telemetry = erp_telemetry::init_telemetry(config.telemetry.clone())
        .await
        .context("Failed to initialize telemetry")?;

    let runtime = NodeRuntime::new(config)?;
    let listener = TcpListener::bind(runtime.config().api.addr())
        .await
        .with_context(|| format!("Failed to bind {}", runtime.config().api.addr()))?;

    runtime.serve(listener, shutdown_signal()).await
}
