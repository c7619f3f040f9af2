//! Caller context extraction.
//!
//! Every route needs the caller's office, user and login. They arrive as
//! request headers; anything missing or malformed is answered with 403.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared_types::UserContext;
use tracing::debug;

use crate::domain::ApiError;

pub const OFFICE_ID_HEADER: &str = "x-office-id";
pub const USER_ID_HEADER: &str = "x-user-id";
pub const LOGIN_ID_HEADER: &str = "x-login-id";

/// Request context of the authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserContext);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| parts.headers.get(name).and_then(|value| value.to_str().ok());

        UserContext::parse(header(OFFICE_ID_HEADER), header(USER_ID_HEADER), header(LOGIN_ID_HEADER))
            .map(Caller)
            .map_err(|e| {
                debug!(error = %e, path = %parts.uri.path(), "[erp-02] Rejected request context");
                ApiError::Forbidden
            })
    }
}
