//! # ERP-01: Purchase Posting Gateway
//!
//! Submits a composite purchase transaction (header, line items, attachments,
//! related transaction ids) to the ledger as one atomic call and relays the
//! generated transaction identifier.
//!
//! ## Architecture
//!
//! - **Domain**: Record types, field layouts, null-sentinel policy, request and outcomes
//! - **Algorithms**: Array parameter encoder, result resolver
//! - **Ports**: Inbound (PurchasePostingApi) and Outbound (LedgerPostingService)
//! - **Application**: Service orchestration
//! - **Adapters**: Postgres ledger, in-memory ledger
//!
//! ## Outcomes
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Missing header, missing or empty line items | `Ok(NotSubmitted)`, no ledger call |
//! | Record does not fit its layout | `Err(Encoding)`, no ledger call |
//! | Ledger rejects or is unreachable | `Err(PostingFailed)` |
//! | Reply is not a positive integer | `Ok(Unresolved)` |
//! | Reply is an identifier | `Ok(Posted(id))` |

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryLedger;
#[cfg(feature = "postgres")]
pub use adapters::PgLedgerPostingService;
pub use algorithms::{resolve_transaction_id, ArrayParameterEncoder, ArrayShape, EncodedArray, ResultResolutionFailure};
pub use application::PurchasePostingService;
pub use config::{ConfigError, LedgerConnectionConfig, PostingConfig};
pub use domain::*;
pub use ports::inbound::PurchasePostingApi;
pub use ports::outbound::LedgerPostingService;
