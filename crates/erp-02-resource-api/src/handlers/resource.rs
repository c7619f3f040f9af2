//! Generic CRUD handlers.
//!
//! One set of handlers serves every [`Resource`]; the router instantiates
//! them per resource type. Failures collapse to [`ApiError`] here, after
//! being logged with their full detail.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use erp_telemetry::record_resource_request;
use tracing::{error, warn};

use crate::domain::{ApiError, CustomField, DisplayField, Filter, ResourceError};
use crate::extract::Caller;
use crate::ports::{Entity, Resource};

type EntityOf<R> = <R as Resource>::Entity;

/// Log, count and collapse the result of one resource call
fn finish<R: Resource, T>(operation: &'static str, result: Result<T, ResourceError>) -> Result<Json<T>, ApiError> {
    let resource = <EntityOf<R> as Entity>::RESOURCE;
    match result {
        Ok(value) => {
            record_resource_request(resource, operation, 200);
            Ok(Json(value))
        }
        Err(e) => {
            let api_error = ApiError::from(e.clone());
            match api_error {
                ApiError::Forbidden => warn!(resource, operation, error = %e, "[erp-02] Access denied"),
                _ => error!(resource, operation, error = %e, "[erp-02] Resource call failed"),
            }
            record_resource_request(resource, operation, api_error.status().as_u16());
            Err(api_error)
        }
    }
}

/// Missing or unreadable body on add/edit
fn no_body<R: Resource>(operation: &'static str) -> ApiError {
    let resource = <EntityOf<R> as Entity>::RESOURCE;
    warn!(resource, operation, "[erp-02] Request without entity body");
    record_resource_request(resource, operation, ApiError::MethodNotAllowed.status().as_u16());
    ApiError::MethodNotAllowed
}

pub async fn count<R: Resource>(State(resource): State<Arc<R>>, Caller(context): Caller) -> Result<Json<u64>, ApiError> {
    finish::<R, _>("count", resource.count(&context).await)
}

/// Missing rows answer `null`
pub async fn get<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    Path(key): Path<i64>,
) -> Result<Json<Option<EntityOf<R>>>, ApiError> {
    finish::<R, _>("get", resource.get(&context, key).await)
}

pub async fn first_page<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
) -> Result<Json<Vec<EntityOf<R>>>, ApiError> {
    finish::<R, _>("get_paged", resource.get_paged(&context, 1).await)
}

pub async fn page<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    Path(page): Path<u64>,
) -> Result<Json<Vec<EntityOf<R>>>, ApiError> {
    finish::<R, _>("get_paged", resource.get_paged(&context, page).await)
}

pub async fn get_where<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    Path(page): Path<u64>,
    Json(filters): Json<Vec<Filter>>,
) -> Result<Json<Vec<EntityOf<R>>>, ApiError> {
    finish::<R, _>("get_where", resource.get_where(&context, page, &filters).await)
}

pub async fn display_fields<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
) -> Result<Json<Vec<DisplayField>>, ApiError> {
    finish::<R, _>("display_fields", resource.display_fields(&context).await)
}

pub async fn custom_fields<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
) -> Result<Json<Vec<CustomField>>, ApiError> {
    finish::<R, _>("custom_fields", resource.custom_fields(&context).await)
}

/// Answers the assigned key
pub async fn add<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    body: Option<Json<EntityOf<R>>>,
) -> Result<Json<i64>, ApiError> {
    let Some(Json(entity)) = body else {
        return Err(no_body::<R>("add"));
    };
    finish::<R, _>("add", resource.add(&context, entity).await)
}

pub async fn edit<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    Path(key): Path<i64>,
    body: Option<Json<EntityOf<R>>>,
) -> Result<Json<()>, ApiError> {
    let Some(Json(entity)) = body else {
        return Err(no_body::<R>("edit"));
    };
    finish::<R, _>("edit", resource.edit(&context, key, entity).await)
}

pub async fn delete<R: Resource>(
    State(resource): State<Arc<R>>,
    Caller(context): Caller,
    Path(key): Path<i64>,
) -> Result<Json<()>, ApiError> {
    finish::<R, _>("delete", resource.delete(&context, key).await)
}
