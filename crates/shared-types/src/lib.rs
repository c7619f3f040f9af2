//! # Shared Types Crate
//!
//! Value types used on both sides of the posting boundary.
//!
//! ## Design Principles
//!
//! - **Explicit Context**: Office, user and login identifiers travel with every
//!   call as a [`UserContext`]. Nothing is read from process-wide session state.
//! - **Reserved Identifier**: [`TransactionId::NONE`] (`0`) means "no transaction
//!   was created" and is never assigned to a posted transaction.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
