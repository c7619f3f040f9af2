//! # ERP-02: Resource API
//!
//! HTTP boundary of the posting services.
//!
//! ## Architecture
//!
//! - **Domain**: Entities, filters, error types
//! - **Ports**: `Entity` and `Resource` CRUD contract
//! - **Adapters**: In-memory resource
//! - **Handlers**: Generic CRUD handlers, purchase submission, health and metrics
//!
//! ## Routes
//!
//! Every resource is served under `/api/v1.5/{schema}/{resource}` and
//! `/api/{schema}/{resource}`:
//!
//! | Method | Path | Answer |
//! |--------|------|--------|
//! | GET | `count` | row count |
//! | GET | `{id}` | row or `null` |
//! | GET | base path, `page/{n}` | one page, sorted by key |
//! | POST | `get-where/{n}` | one page of rows matching a filter list |
//! | GET | `display-fields` | key/label pairs |
//! | GET | `custom-fields` | user-defined fields |
//! | POST | `add` | assigned key |
//! | PUT | `edit/{id}` | `null` |
//! | DELETE | `delete/{id}` | `null` |
//!
//! Purchases are submitted with `POST /api/v1.5/transactions/purchase`.
//!
//! ## Errors
//!
//! Callers see 403 for a missing or refused context, 405 for add/edit without
//! a body, and 500 for everything else, including a purchase body that does
//! not decode.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod extract;
pub mod handlers;
pub mod ports;
pub mod router;

pub use adapters::InMemoryResource;
pub use config::{ApiConfig, ConfigError};
pub use domain::*;
pub use extract::Caller;
pub use handlers::{PostedTransaction, PostingGateway};
pub use ports::{Entity, Resource};
pub use router::{build_router, purchase_router, resource_router};
