//! # Service Container
//!
//! Builds the ledger adapter, posting gateway and resources from a
//! [`NodeConfig`] and holds them for the lifetime of the node.

pub mod config;

pub use config::{ConfigError, NodeConfig};

use std::sync::Arc;

use anyhow::{Context, Result};
use erp_01_purchase_posting::{InMemoryLedger, PgLedgerPostingService, PurchasePostingService};
use erp_02_resource_api::{CustomerReceipt, InMemoryResource, PostingGateway};
use tracing::{info, warn};

/// Which ledger backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Postgres,
    InMemory,
}

/// Initialized services.
pub struct ServiceContainer {
    pub gateway: PostingGateway,
    pub receipts: Arc<InMemoryResource<CustomerReceipt>>,
    pub ledger_kind: LedgerKind,
}

impl ServiceContainer {
    /// Build all services. The database pool connects lazily.
    pub fn build(config: &NodeConfig) -> Result<Self> {
        config.validate().context("Invalid node configuration")?;

        let (gateway, ledger_kind) = match &config.ledger {
            Some(ledger) => {
                let pg = PgLedgerPostingService::connect_lazy(ledger).context("Failed to create ledger pool")?;
                info!(max_connections = ledger.max_connections, "[erp-01] PostgreSQL ledger configured");
                let gateway: PostingGateway = Arc::new(PurchasePostingService::with_config(pg, config.posting.clone()));
                (gateway, LedgerKind::Postgres)
            }
            None => {
                warn!("[erp-01] Demo mode: postings go to an in-memory ledger and are lost on exit");
                let gateway: PostingGateway =
                    Arc::new(PurchasePostingService::with_config(InMemoryLedger::new(), config.posting.clone()));
                (gateway, LedgerKind::InMemory)
            }
        };

        let mut receipts = InMemoryResource::new(config.api.page_size);
        if !config.receipt_offices.is_empty() {
            receipts = receipts.restricted_to_offices(config.receipt_offices.iter().copied());
        }

        Ok(Self {
            gateway,
            receipts: Arc::new(receipts),
            ledger_kind,
        })
    }
}
