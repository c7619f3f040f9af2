//! Domain module for purchase posting
//!
//! Record types, field layouts, the null policy and the assembled request.

pub mod entities;
pub mod errors;
pub mod null_policy;
pub mod outcome;
pub mod records;
pub mod request;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use null_policy::*;
pub use outcome::*;
pub use records::ArrayRecord;
pub use request::*;
pub use value_objects::*;
