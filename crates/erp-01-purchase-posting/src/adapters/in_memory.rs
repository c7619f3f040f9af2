//! In-memory ledger
//!
//! Stands in for the ledger database in demo mode and in tests. Every post
//! is recorded whole under one lock and answered with the next identifier,
//! as text, the way the posting function replies.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::TransactionId;
use tracing::debug;

use crate::domain::errors::LedgerError;
use crate::domain::request::PostingRequest;
use crate::domain::value_objects::ScalarReply;
use crate::ports::outbound::LedgerPostingService;

/// A posting accepted by the in-memory ledger
#[derive(Debug, Clone)]
pub struct RecordedPosting {
    pub transaction_id: TransactionId,
    pub request: PostingRequest,
}

struct LedgerState {
    next_id: i64,
    postings: Vec<RecordedPosting>,
}

pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Ledger whose first identifier is `first_id`
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                next_id: first_id.max(1),
                postings: Vec::new(),
            }),
        }
    }

    pub fn postings(&self) -> Vec<RecordedPosting> {
        self.state.lock().postings.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerPostingService for InMemoryLedger {
    async fn post(&self, request: &PostingRequest) -> Result<ScalarReply, LedgerError> {
        if request.line_items.is_empty() {
            return Err(LedgerError::Rejected {
                code: None,
                message: "a purchase needs at least one line item".to_string(),
            });
        }

        let mut state = self.state.lock();
        let transaction_id = TransactionId(state.next_id);
        state.next_id += 1;
        state.postings.push(RecordedPosting {
            transaction_id,
            request: request.clone(),
        });

        debug!(transaction_id = transaction_id.value(), "[erp-01] In-memory posting recorded");
        Ok(ScalarReply::Text(transaction_id.to_string()))
    }
}
