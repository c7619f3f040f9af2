//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::Submission;
use crate::domain::errors::PostingError;
use crate::domain::outcome::SubmissionOutcome;
use async_trait::async_trait;
use shared_types::{TransactionId, UserContext};

/// Primary purchase posting API
#[async_trait]
pub trait PurchasePostingApi: Send + Sync {
    /// Submit one composite purchase transaction.
    ///
    /// Runs the preconditions, encodes the collections, and posts once.
    /// Only encoding failures and ledger failures are errors. The gateway
    /// sets no timeout; wrap the future at the call site if one is needed.
    async fn submit(&self, context: &UserContext, submission: &Submission) -> Result<SubmissionOutcome, PostingError>;

    /// Same as [`submit`](Self::submit), collapsed to an identifier.
    ///
    /// Returns [`TransactionId::NONE`] when nothing was posted.
    async fn post_purchase(&self, context: &UserContext, submission: &Submission) -> Result<TransactionId, PostingError> {
        Ok(self.submit(context, submission).await?.transaction_id())
    }
}
