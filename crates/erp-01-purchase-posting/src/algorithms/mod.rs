//! Algorithms module for purchase posting
//!
//! Contains:
//! - Array parameter encoder
//! - Result resolver

pub mod array_encoder;
pub mod result_resolver;

pub use array_encoder::{ArrayParameterEncoder, ArrayShape, EncodedArray};
pub use result_resolver::{resolve_transaction_id, ResolutionReason, ResultResolutionFailure};
