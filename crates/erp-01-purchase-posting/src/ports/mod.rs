//! Ports module for purchase posting
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::PurchasePostingApi;
pub use outbound::LedgerPostingService;
