//! Route table.
//!
//! Each resource is mounted twice, under `/api/v1.5/{schema}/{resource}`
//! and under the unversioned alias `/api/{schema}/{resource}`.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{self, resource as crud, PostingGateway};
use crate::ports::{Entity, Resource};

pub const API_PREFIXES: [&str; 2] = ["/api/v1.5", "/api"];

/// Every CRUD route of one resource, under both prefixes
pub fn resource_router<R>(resource: Arc<R>) -> Router
where
    R: Resource + 'static,
{
    let mut router = Router::new();
    for prefix in API_PREFIXES {
        let base = format!("{}/{}/{}", prefix, R::Entity::SCHEMA, R::Entity::RESOURCE);
        router = router
            .route(&base, get(crud::first_page::<R>))
            .route(&format!("{base}/count"), get(crud::count::<R>))
            .route(&format!("{base}/page/:page"), get(crud::page::<R>))
            .route(&format!("{base}/get-where/:page"), post(crud::get_where::<R>))
            .route(&format!("{base}/display-fields"), get(crud::display_fields::<R>))
            .route(&format!("{base}/custom-fields"), get(crud::custom_fields::<R>))
            .route(&format!("{base}/add"), post(crud::add::<R>))
            .route(&format!("{base}/edit/:id"), put(crud::edit::<R>))
            .route(&format!("{base}/delete/:id"), delete(crud::delete::<R>))
            .route(&format!("{base}/:id"), get(crud::get::<R>));
    }
    router.with_state(resource)
}

/// Purchase submission under both prefixes
pub fn purchase_router(gateway: PostingGateway) -> Router {
    let mut router = Router::new();
    for prefix in API_PREFIXES {
        router = router.route(&format!("{prefix}/transactions/purchase"), post(handlers::post_purchase));
    }
    router.with_state(gateway)
}

/// Full application router with middleware
pub fn build_router<R>(config: &ApiConfig, gateway: PostingGateway, receipts: Arc<R>) -> Router
where
    R: Resource + 'static,
{
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .merge(purchase_router(gateway))
        .merge(resource_router(receipts))
        .layer(middleware)
}
