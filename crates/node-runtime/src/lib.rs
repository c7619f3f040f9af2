//! # ERP Node Runtime Library
//!
//! Exposes the runtime for the `erp-node` binary and for tests.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (environment, then CLI flags)
//! 2. Initialize telemetry
//! 3. Build ledger adapter, gateway and resources
//! 4. Serve the HTTP API until shutdown is signalled

pub mod container;

pub use container::{ConfigError, LedgerKind, NodeConfig, ServiceContainer};

use std::future::Future;

use anyhow::{Context, Result};
use axum::Router;
use erp_02_resource_api::build_router;
use tokio::net::TcpListener;
use tracing::info;

/// The node runtime: configured services plus the HTTP router.
pub struct NodeRuntime {
    config: NodeConfig,
    container: ServiceContainer,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self> {
        let container = ServiceContainer::build(&config)?;
        Ok(Self { config, container })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    pub fn router(&self) -> Router {
        build_router(
            &self.config.api,
            self.container.gateway.clone(),
            self.container.receipts.clone(),
        )
    }

    /// Serve on `listener` until `shutdown` completes.
    pub async fn serve(self, listener: TcpListener, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = listener.local_addr().context("Listener has no local address")?;
        info!("===========================================");
        info!("  ERP Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("  Ledger: {:?}", self.container.ledger_kind);
        info!("  Listening on {}", addr);
        info!("===========================================");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        info!("Shutdown complete");
        Ok(())
    }
}
