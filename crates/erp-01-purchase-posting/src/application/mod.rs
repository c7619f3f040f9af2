//! Application layer for purchase posting

pub mod service;

pub use service::PurchasePostingService;
