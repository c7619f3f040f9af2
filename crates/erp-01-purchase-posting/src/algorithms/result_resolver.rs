//! Result resolver
//!
//! Reads the ledger's scalar reply as a transaction identifier. A reply that
//! is not a positive integer is a [`ResultResolutionFailure`], which the
//! gateway turns into the "nothing posted" outcome instead of an error.

use std::fmt;

use crate::domain::value_objects::ScalarReply;
use shared_types::TransactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionReason {
    Null,
    NotAnInteger,
    NonPositive,
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "reply was null",
            Self::NotAnInteger => "reply is not an integer",
            Self::NonPositive => "reply is not a positive identifier",
        })
    }
}

/// The reply could not be read as a transaction identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultResolutionFailure {
    /// Reply as received
    pub raw: ScalarReply,
    pub reason: ResolutionReason,
}

impl fmt::Display for ResultResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.raw)
    }
}

pub fn resolve_transaction_id(reply: &ScalarReply) -> Result<TransactionId, ResultResolutionFailure> {
    let fail = |reason| ResultResolutionFailure {
        raw: reply.clone(),
        reason,
    };

    let value = match reply {
        ScalarReply::Null => return Err(fail(ResolutionReason::Null)),
        ScalarReply::Integer(v) => *v,
        ScalarReply::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| fail(ResolutionReason::NotAnInteger))?,
        ScalarReply::Unsupported(_) => return Err(fail(ResolutionReason::NotAnInteger)),
    };

    if value <= 0 {
        return Err(fail(ResolutionReason::NonPositive));
    }
    Ok(TransactionId(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_text_resolves() {
        assert_eq!(resolve_transaction_id(&ScalarReply::Text("42".into())), Ok(TransactionId(42)));
        assert_eq!(resolve_transaction_id(&ScalarReply::Text(" 555\n".into())), Ok(TransactionId(555)));
    }

    #[test]
    fn test_integer_resolves() {
        assert_eq!(resolve_transaction_id(&ScalarReply::Integer(7)), Ok(TransactionId(7)));
    }

    #[test]
    fn test_non_numeric_fails_soft() {
        let failure = resolve_transaction_id(&ScalarReply::Text("abc".into())).unwrap_err();
        assert_eq!(failure.reason, ResolutionReason::NotAnInteger);
        assert_eq!(failure.raw, ScalarReply::Text("abc".into()));

        let failure = resolve_transaction_id(&ScalarReply::Text("4.2".into())).unwrap_err();
        assert_eq!(failure.reason, ResolutionReason::NotAnInteger);
    }

    #[test]
    fn test_null_and_unsupported() {
        assert_eq!(
            resolve_transaction_id(&ScalarReply::Null).unwrap_err().reason,
            ResolutionReason::Null
        );
        assert_eq!(
            resolve_transaction_id(&ScalarReply::Unsupported("json".into()))
                .unwrap_err()
                .reason,
            ResolutionReason::NotAnInteger
        );
    }

    #[test]
    fn test_zero_and_negative_are_not_identifiers() {
        assert_eq!(
            resolve_transaction_id(&ScalarReply::Integer(0)).unwrap_err().reason,
            ResolutionReason::NonPositive
        );
        assert_eq!(
            resolve_transaction_id(&ScalarReply::Text("-3".into())).unwrap_err().reason,
            ResolutionReason::NonPositive
        );
    }
}
