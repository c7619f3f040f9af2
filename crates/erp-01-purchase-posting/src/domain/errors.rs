//! Error types for purchase posting
//!
//! Only [`PostingError`] crosses the gateway boundary. Skipped submissions
//! and unreadable replies are outcomes, not errors; see
//! [`crate::SubmissionOutcome`].

use crate::domain::value_objects::ScalarKind;
use thiserror::Error;

/// A record could not be mapped onto its scalar layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("{collection}[{index}].{field}: expected {expected}, got {actual}")]
    KindMismatch {
        collection: &'static str,
        index: usize,
        field: &'static str,
        expected: ScalarKind,
        actual: ScalarKind,
    },

    #[error("{collection}[{index}].{field}: {len} characters exceeds limit of {max}")]
    TooLong {
        collection: &'static str,
        index: usize,
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Record produced a different number of scalars than its layout declares
    #[error("{collection}[{index}]: produced {actual} values, layout declares {expected}")]
    ArityMismatch {
        collection: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },
}

impl EncodingError {
    /// Position of the offending record in its collection
    pub fn index(&self) -> usize {
        match self {
            Self::KindMismatch { index, .. } | Self::TooLong { index, .. } | Self::ArityMismatch { index, .. } => *index,
        }
    }

    /// Offending field, if the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::KindMismatch { field, .. } | Self::TooLong { field, .. } => Some(*field),
            Self::ArityMismatch { .. } => None,
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Self::KindMismatch { collection, .. }
            | Self::TooLong { collection, .. }
            | Self::ArityMismatch { collection, .. } => *collection,
        }
    }
}

/// Failure reported by the ledger posting service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger refused the transaction (constraint or business rule)
    #[error("ledger rejected posting{}: {message}", code_suffix(.code))]
    Rejected { code: Option<String>, message: String },

    /// The ledger could not be reached or the call did not complete
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref().map(|c| format!(" [{}]", c)).unwrap_or_default()
}

/// Errors surfaced by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The ledger call failed; carried through unmodified
    #[error("posting failed: {0}")]
    PostingFailed(#[from] LedgerError),
}

impl PostingError {
    /// Metric/log label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "encoding_error",
            Self::PostingFailed(_) => "posting_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_names_field_and_index() {
        let err = EncodingError::TooLong {
            collection: "line_items",
            index: 1,
            field: "item_code",
            len: 20,
            max: 12,
        };
        assert_eq!(err.index(), 1);
        assert_eq!(err.field(), Some("item_code"));
        assert_eq!(err.to_string(), "line_items[1].item_code: 20 characters exceeds limit of 12");
    }

    #[test]
    fn test_rejected_message_includes_code() {
        let err = LedgerError::Rejected {
            code: Some("23503".into()),
            message: "fk violation".into(),
        };
        assert_eq!(err.to_string(), "ledger rejected posting [23503]: fk violation");

        let err = LedgerError::Rejected {
            code: None,
            message: "closed period".into(),
        };
        assert_eq!(err.to_string(), "ledger rejected posting: closed period");
    }

    #[test]
    fn test_ledger_error_converts_to_posting_failed() {
        let err: PostingError = LedgerError::Unavailable("timeout".into()).into();
        assert!(matches!(err, PostingError::PostingFailed(LedgerError::Unavailable(_))));
        assert_eq!(err.label(), "posting_failed");
    }
}
