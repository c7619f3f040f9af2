//! Ports for the resource API.
//!
//! [`Resource`] is the generic CRUD contract every business entity exposes.
//! Each call carries the caller's [`UserContext`]; implementations decide
//! authorization from it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::UserContext;

use crate::domain::{CustomField, DisplayField, Filter, ResourceError};

/// A business entity served by a [`Resource`]
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Schema segment of the route, e.g. `transactions`
    const SCHEMA: &'static str;
    /// Resource segment of the route, e.g. `customer-receipt`
    const RESOURCE: &'static str;
    /// Primary key column; listings sort by it
    const PRIMARY_KEY: &'static str;

    fn key(&self) -> i64;

    fn set_key(&mut self, key: i64);

    /// Label shown for this row in lookups
    fn display_value(&self) -> String;
}

/// Generic CRUD surface
#[async_trait]
pub trait Resource: Send + Sync {
    type Entity: Entity;

    async fn count(&self, context: &UserContext) -> Result<u64, ResourceError>;

    async fn get(&self, context: &UserContext, key: i64) -> Result<Option<Self::Entity>, ResourceError>;

    /// One page, sorted by primary key. Pages start at 1.
    async fn get_paged(&self, context: &UserContext, page: u64) -> Result<Vec<Self::Entity>, ResourceError>;

    /// One page of the rows matching `filters`
    async fn get_where(
        &self,
        context: &UserContext,
        page: u64,
        filters: &[Filter],
    ) -> Result<Vec<Self::Entity>, ResourceError>;

    async fn display_fields(&self, context: &UserContext) -> Result<Vec<DisplayField>, ResourceError>;

    async fn custom_fields(&self, context: &UserContext) -> Result<Vec<CustomField>, ResourceError>;

    /// Insert and return the assigned key
    async fn add(&self, context: &UserContext, entity: Self::Entity) -> Result<i64, ResourceError>;

    /// Replace the row at `key`
    async fn edit(&self, context: &UserContext, key: i64, entity: Self::Entity) -> Result<(), ResourceError>;

    async fn delete(&self, context: &UserContext, key: i64) -> Result<(), ResourceError>;
}
