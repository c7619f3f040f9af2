//! In-memory resource.
//!
//! Rows live in a `BTreeMap` keyed by primary key, so every listing comes
//! out sorted by key. Used in demo mode and tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use shared_types::UserContext;
use tracing::debug;

use crate::domain::{matches_all, CustomField, DisplayField, Filter, ResourceError};
use crate::ports::{Entity, Resource};

pub struct InMemoryResource<E: Entity> {
    rows: RwLock<BTreeMap<i64, E>>,
    page_size: usize,
    offices: Option<BTreeSet<i32>>,
    custom_fields: Vec<CustomField>,
}

impl<E: Entity> InMemoryResource<E> {
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
            offices: None,
            custom_fields: Vec::new(),
        }
    }

    /// Only callers from these offices may use the resource
    pub fn restricted_to_offices(mut self, offices: impl IntoIterator<Item = i32>) -> Self {
        self.offices = Some(offices.into_iter().collect());
        self
    }

    pub fn with_custom_fields(mut self, fields: Vec<CustomField>) -> Self {
        self.custom_fields = fields;
        self
    }

    /// Seed rows as-is, keeping their keys
    pub fn with_rows(self, rows: impl IntoIterator<Item = E>) -> Self {
        {
            let mut map = self.rows.write();
            for row in rows {
                map.insert(row.key(), row);
            }
        }
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn authorize(&self, context: &UserContext) -> Result<(), ResourceError> {
        match &self.offices {
            Some(offices) if !offices.contains(&context.office_id) => Err(ResourceError::Unauthorized {
                resource: E::RESOURCE,
                office_id: context.office_id,
            }),
            _ => Ok(()),
        }
    }

    /// Offset of a 1-based page; page 0 reads as page 1
    fn offset(&self, page: u64) -> usize {
        let index = usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX);
        index.saturating_mul(self.page_size)
    }
}

fn to_columns<E: Entity>(entity: &E) -> Result<serde_json::Map<String, Value>, ResourceError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ResourceError::Serialization(format!(
            "{} serialized to {} instead of an object",
            E::RESOURCE,
            other
        ))),
        Err(e) => Err(ResourceError::Serialization(e.to_string())),
    }
}

#[async_trait]
impl<E: Entity> Resource for InMemoryResource<E> {
    type Entity = E;

    async fn count(&self, context: &UserContext) -> Result<u64, ResourceError> {
        self.authorize(context)?;
        Ok(self.rows.read().len() as u64)
    }

    async fn get(&self, context: &UserContext, key: i64) -> Result<Option<E>, ResourceError> {
        self.authorize(context)?;
        Ok(self.rows.read().get(&key).cloned())
    }

    async fn get_paged(&self, context: &UserContext, page: u64) -> Result<Vec<E>, ResourceError> {
        self.authorize(context)?;
        let rows = self.rows.read();
        Ok(rows
            .values()
            .skip(self.offset(page))
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn get_where(&self, context: &UserContext, page: u64, filters: &[Filter]) -> Result<Vec<E>, ResourceError> {
        self.authorize(context)?;
        let rows = self.rows.read();

        let mut matched = Vec::new();
        for row in rows.values() {
            if matches_all(filters, &to_columns(row)?)? {
                matched.push(row);
            }
        }

        Ok(matched
            .into_iter()
            .skip(self.offset(page))
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn display_fields(&self, context: &UserContext) -> Result<Vec<DisplayField>, ResourceError> {
        self.authorize(context)?;
        Ok(self
            .rows
            .read()
            .values()
            .map(|row| DisplayField {
                key: row.key().to_string(),
                value: row.display_value(),
            })
            .collect())
    }

    async fn custom_fields(&self, context: &UserContext) -> Result<Vec<CustomField>, ResourceError> {
        self.authorize(context)?;
        Ok(self.custom_fields.clone())
    }

    async fn add(&self, context: &UserContext, mut entity: E) -> Result<i64, ResourceError> {
        self.authorize(context)?;
        let mut rows = self.rows.write();
        let key = rows.keys().next_back().map_or(1, |last| last + 1);
        entity.set_key(key);
        rows.insert(key, entity);
        debug!(resource = E::RESOURCE, key, user_id = context.user_id, "[erp-02] Row added");
        Ok(key)
    }

    async fn edit(&self, context: &UserContext, key: i64, mut entity: E) -> Result<(), ResourceError> {
        self.authorize(context)?;
        let mut rows = self.rows.write();
        // Editing a missing row changes nothing
        if let Some(slot) = rows.get_mut(&key) {
            entity.set_key(key);
            *slot = entity;
            debug!(resource = E::RESOURCE, key, user_id = context.user_id, "[erp-02] Row edited");
        }
        Ok(())
    }

    async fn delete(&self, context: &UserContext, key: i64) -> Result<(), ResourceError> {
        self.authorize(context)?;
        if self.rows.write().remove(&key).is_some() {
            debug!(resource = E::RESOURCE, key, user_id = context.user_id, "[erp-02] Row deleted");
        }
        Ok(())
    }
}
