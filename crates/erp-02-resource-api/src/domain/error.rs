//! Resource API error types.
//!
//! [`ResourceError`] is what a resource reports. [`ApiError`] is what the
//! HTTP boundary answers with: forbidden, method not allowed, or internal
//! error. Nothing finer reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors reported by a resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// Caller's office may not access this resource
    #[error("office {office_id} is not authorized for {resource}")]
    Unauthorized { resource: &'static str, office_id: i32 },

    /// Filter names a column the entity does not have
    #[error("unknown filter column: {column}")]
    InvalidFilter { column: String },

    /// Entity could not be converted to or from its column form
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Error answered at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("forbidden")]
    Forbidden,

    /// Add or edit without a usable body
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::Unauthorized { .. } => Self::Forbidden,
            _ => Self::Internal,
        }
    }
}

impl From<erp_01_purchase_posting::PostingError> for ApiError {
    fn from(_: erp_01_purchase_posting::PostingError) -> Self {
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("error"),
        }));
        (status, body).into_response()
    }
}
