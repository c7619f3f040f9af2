//! Domain types for the resource API.

pub mod entities;
pub mod error;
pub mod filter;

pub use entities::{CustomField, CustomerReceipt, DisplayField};
pub use error::{ApiError, ResourceError};
pub use filter::{matches_all, Filter, FilterCondition, FilterStatement};
