//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ledger port.
//!
//! - [`PgLedgerPostingService`]: Postgres pool, enabled by the `postgres` feature
//! - [`InMemoryLedger`]: process-local ledger for demo mode and tests

mod in_memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use in_memory::{InMemoryLedger, RecordedPosting};
#[cfg(feature = "postgres")]
pub use postgres::PgLedgerPostingService;
