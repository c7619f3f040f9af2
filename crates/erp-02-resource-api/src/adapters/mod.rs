//! # Adapters Layer
//!
//! Resource implementations.

mod in_memory;

pub use in_memory::InMemoryResource;
