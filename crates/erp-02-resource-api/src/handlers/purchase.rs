//! Purchase submission endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use erp_01_purchase_posting::{PurchasePostingApi, Submission};
use erp_telemetry::{record_submission, time_histogram, POSTING_DURATION};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::ApiError;
use crate::extract::Caller;

/// Body answered on every non-failing submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTransaction {
    /// `0` when nothing was posted
    pub transaction_master_id: i64,
}

pub type PostingGateway = Arc<dyn PurchasePostingApi>;

/// Empty body is an empty submission; anything unreadable is refused
fn read_submission(body: &[u8]) -> Result<Submission, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Submission::default());
    }
    serde_json::from_slice(body)
}

/// `POST .../transactions/purchase`
///
/// A missing body is an empty submission, which the gateway skips.
/// A body that does not decode into a submission answers 500.
pub async fn post_purchase(
    State(gateway): State<PostingGateway>,
    Caller(context): Caller,
    body: Bytes,
) -> Result<Json<PostedTransaction>, ApiError> {
    let submission = match read_submission(&body) {
        Ok(submission) => submission,
        Err(e) => {
            record_submission("encoding_error");
            error!(
                error = %e,
                office_id = context.office_id,
                user_id = context.user_id,
                "[erp-02] Unreadable purchase body"
            );
            return Err(ApiError::Internal);
        }
    };
    let _timer = time_histogram!(POSTING_DURATION);

    match gateway.submit(&context, &submission).await {
        Ok(outcome) => {
            record_submission(outcome.label());
            Ok(Json(PostedTransaction {
                transaction_master_id: outcome.transaction_id().value(),
            }))
        }
        Err(e) => {
            record_submission(e.label());
            error!(
                error = %e,
                office_id = context.office_id,
                user_id = context.user_id,
                "[erp-02] Purchase submission failed"
            );
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_is_empty_submission() {
        assert_eq!(read_submission(b"").unwrap(), Submission::default());
        assert_eq!(read_submission(b" \n").unwrap(), Submission::default());
    }

    #[test]
    fn test_unreadable_body_is_refused() {
        assert!(read_submission(b"{").is_err());
        assert!(read_submission(br#"{"line_items":[{"quantity":1.5}]}"#).is_err());
    }
}
