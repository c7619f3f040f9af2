//! HTTP handlers.

pub mod purchase;
pub mod resource;
pub mod system;

pub use purchase::{post_purchase, PostedTransaction, PostingGateway};
pub use system::{health_check, metrics};
