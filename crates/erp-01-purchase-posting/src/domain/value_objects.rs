//! Value objects for the posting gateway
//!
//! Scalar values bound into the ledger call, and the static field layouts
//! that describe how a record flattens into those scalars.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar kinds understood by the ledger posting function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Integer,
    BigInt,
    Text,
    Boolean,
    Date,
    Numeric,
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One bindable scalar.
///
/// `Null` is the absence marker. It keeps its kind so the bound parameter
/// stays typed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlValue {
    Null(ScalarKind),
    Integer(i32),
    BigInt(i64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Numeric(Decimal),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Null(kind) => *kind,
            Self::Integer(_) => ScalarKind::Integer,
            Self::BigInt(_) => ScalarKind::BigInt,
            Self::Text(_) => ScalarKind::Text,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::Date(_) => ScalarKind::Date,
            Self::Numeric(_) => ScalarKind::Numeric,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }
}

/// One field of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name inside the composite type.
    pub name: &'static str,
    /// Expected scalar kind.
    pub kind: ScalarKind,
    /// Cast applied to the placeholder in the rendered statement.
    pub sql_type: &'static str,
    /// Character limit for `varchar(n)` columns.
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: ScalarKind, sql_type: &'static str) -> Self {
        Self {
            name,
            kind,
            sql_type,
            max_len: None,
        }
    }

    pub const fn varchar(name: &'static str, max_len: usize, sql_type: &'static str) -> Self {
        Self {
            name,
            kind: ScalarKind::Text,
            sql_type,
            max_len: Some(max_len),
        }
    }
}

/// How one array element is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementForm {
    /// `$n::type` - a single scalar per element.
    Scalar,
    /// `ROW($n, $n+1, ...)::type` - a composite per element.
    Composite,
}

/// Static description of one collection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Collection name used in diagnostics.
    pub collection: &'static str,
    /// Default element type of the array.
    pub element_type: &'static str,
    pub form: ElementForm,
    /// Ordered fields; position is the bind order inside a record.
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Number of scalars per record.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

/// Raw scalar returned by the ledger posting function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarReply {
    /// No row, or a SQL `NULL`.
    Null,
    Integer(i64),
    Text(String),
    /// Column type the adapter could not decode; carries the type name.
    Unsupported(String),
}

impl fmt::Display for ScalarReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{:?}", v),
            Self::Unsupported(ty) => write!(f, "<unsupported {}>", ty),
        }
    }
}
