//! Submission outcomes
//!
//! Every non-error result of a submission. Skips and unreadable replies both
//! surface as [`TransactionId::NONE`] to callers that only want an id, but
//! they stay distinct here.

use std::fmt;

use crate::algorithms::result_resolver::ResultResolutionFailure;
use shared_types::TransactionId;

/// Why a submission was not sent to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionNotMet {
    MissingHeader,
    MissingLineItems,
    EmptyLineItems,
}

impl fmt::Display for PreconditionNotMet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingHeader => "header is absent",
            Self::MissingLineItems => "line items are absent",
            Self::EmptyLineItems => "line items are empty",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The ledger recorded the transaction
    Posted(TransactionId),
    /// Nothing was sent; no ledger call happened
    NotSubmitted(PreconditionNotMet),
    /// The ledger call returned, but its reply was not an identifier
    Unresolved(ResultResolutionFailure),
}

impl SubmissionOutcome {
    /// Identifier as callers see it; `0` unless posted
    pub fn transaction_id(&self) -> TransactionId {
        match self {
            Self::Posted(id) => *id,
            Self::NotSubmitted(_) | Self::Unresolved(_) => TransactionId::NONE,
        }
    }

    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted(_))
    }

    /// Metric/log label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Posted(_) => "posted",
            Self::NotSubmitted(_) => "skipped",
            Self::Unresolved(_) => "unresolved",
        }
    }
}
