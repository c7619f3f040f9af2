//! Outbound Ports (Driven Ports / SPI)

use std::sync::Arc;

use crate::domain::errors::LedgerError;
use crate::domain::request::PostingRequest;
use crate::domain::value_objects::ScalarReply;
use async_trait::async_trait;

/// Ledger posting service
///
/// Executes one request atomically: either everything is recorded and a
/// scalar comes back, or nothing is recorded and an error comes back.
/// Implementations hold a connection only for the duration of `post`.
#[async_trait]
pub trait LedgerPostingService: Send + Sync {
    async fn post(&self, request: &PostingRequest) -> Result<ScalarReply, LedgerError>;
}

#[async_trait]
impl<T: LedgerPostingService + ?Sized> LedgerPostingService for Arc<T> {
    async fn post(&self, request: &PostingRequest) -> Result<ScalarReply, LedgerError> {
        (**self).post(request).await
    }
}

/// Mock implementations for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Ledger double that records every request and answers with a fixed result
    pub struct RecordingLedger {
        response: Result<ScalarReply, LedgerError>,
        calls: AtomicUsize,
        requests: Mutex<Vec<PostingRequest>>,
    }

    impl RecordingLedger {
        pub fn replying(reply: ScalarReply) -> Self {
            Self::with_response(Ok(reply))
        }

        /// Replies with a text scalar, the way the posting function does
        pub fn replying_text(reply: &str) -> Self {
            Self::replying(ScalarReply::Text(reply.to_string()))
        }

        pub fn failing(error: LedgerError) -> Self {
            Self::with_response(Err(error))
        }

        fn with_response(response: Result<ScalarReply, LedgerError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<PostingRequest> {
            self.requests.lock().last().cloned()
        }

        pub fn requests(&self) -> Vec<PostingRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl LedgerPostingService for RecordingLedger {
        async fn post(&self, request: &PostingRequest) -> Result<ScalarReply, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().push(request.clone());
            self.response.clone()
        }
    }
}
