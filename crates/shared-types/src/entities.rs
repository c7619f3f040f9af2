//! # Core Entities
//!
//! Caller context and ledger transaction identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ContextError;

/// Identifier of a posted ledger transaction (transaction master id).
///
/// Produced exclusively by the ledger posting function. `0` is reserved for
/// "no transaction was created".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl TransactionId {
    /// Sentinel meaning nothing was posted.
    pub const NONE: TransactionId = TransactionId(0);

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }

    /// True for the reserved sentinel.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for TransactionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is acting, and from which office.
///
/// Passed explicitly into every gateway and resource call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserContext {
    pub office_id: i32,
    pub user_id: i32,
    pub login_id: i64,
}

impl UserContext {
    pub fn new(office_id: i32, user_id: i32, login_id: i64) -> Self {
        Self {
            office_id,
            user_id,
            login_id,
        }
    }

    /// Build a context from raw textual identifiers (e.g. request headers).
    pub fn parse(
        office_id: Option<&str>,
        user_id: Option<&str>,
        login_id: Option<&str>,
    ) -> Result<Self, ContextError> {
        let context = Self {
            office_id: parse_field("office_id", office_id)?,
            user_id: parse_field("user_id", user_id)?,
            login_id: parse_field("login_id", login_id)?,
        };
        context.validate()?;
        Ok(context)
    }

    /// All identifiers must be positive.
    pub fn validate(&self) -> Result<(), ContextError> {
        let fields = [
            ("office_id", i64::from(self.office_id)),
            ("user_id", i64::from(self.user_id)),
            ("login_id", self.login_id),
        ];
        for (field, value) in fields {
            if value <= 0 {
                return Err(ContextError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<T, ContextError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty());
    let raw = raw.ok_or(ContextError::Missing { field })?;
    raw.parse().map_err(|_| ContextError::Invalid {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_sentinel() {
        assert!(TransactionId::NONE.is_none());
        assert!(!TransactionId(42).is_none());
        assert_eq!(TransactionId::default(), TransactionId::NONE);
    }

    #[test]
    fn test_transaction_id_serializes_as_integer() {
        let json = serde_json::to_string(&TransactionId(555)).unwrap();
        assert_eq!(json, "555");
    }

    #[test]
    fn test_context_parse() {
        let ctx = UserContext::parse(Some("2"), Some(" 3 "), Some("9001")).unwrap();
        assert_eq!(ctx, UserContext::new(2, 3, 9001));
    }

    #[test]
    fn test_context_parse_missing_field() {
        let err = UserContext::parse(Some("2"), None, Some("1")).unwrap_err();
        assert_eq!(err, ContextError::Missing { field: "user_id" });
    }

    #[test]
    fn test_context_parse_invalid_field() {
        let err = UserContext::parse(Some("two"), Some("3"), Some("1")).unwrap_err();
        assert!(matches!(err, ContextError::Invalid { field: "office_id", .. }));
    }

    #[test]
    fn test_context_rejects_non_positive() {
        let err = UserContext::parse(Some("1"), Some("1"), Some("0")).unwrap_err();
        assert_eq!(
            err,
            ContextError::NotPositive {
                field: "login_id",
                value: 0
            }
        );
    }
}
