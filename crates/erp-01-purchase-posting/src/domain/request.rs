//! The assembled ledger call
//!
//! A [`PostingRequest`] is everything one posting needs, already encoded.
//! Rendering it gives a single parameterised statement whose placeholders
//! run header first, then related ids, line items and attachments.

use crate::algorithms::array_encoder::EncodedArray;
use crate::domain::null_policy::HeaderField;
use crate::domain::value_objects::SqlValue;

/// One scalar header argument after the null policy ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParameter {
    pub field: HeaderField,
    pub value: SqlValue,
}

/// One atomic call to the ledger posting function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingRequest {
    /// Qualified function name, e.g. `transactions.post_purchase`
    pub function: String,
    /// Header arguments in [`HeaderField::CALL_ORDER`]
    pub header: Vec<HeaderParameter>,
    pub related_transaction_ids: EncodedArray,
    pub line_items: EncodedArray,
    pub attachments: EncodedArray,
}

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl PostingRequest {
    pub fn header_value(&self, field: HeaderField) -> Option<&SqlValue> {
        self.header.iter().find(|p| p.field == field).map(|p| &p.value)
    }

    fn arrays(&self) -> [&EncodedArray; 3] {
        [&self.related_transaction_ids, &self.line_items, &self.attachments]
    }

    pub fn bind_count(&self) -> usize {
        self.header.len() + self.arrays().iter().map(|a| a.bind_count()).sum::<usize>()
    }

    pub fn to_statement(&self) -> BoundStatement {
        let mut args = Vec::with_capacity(self.header.len() + 3);
        let mut params = Vec::with_capacity(self.bind_count());

        for (i, param) in self.header.iter().enumerate() {
            args.push(format!("${}::{}", i + 1, param.field.sql_type()));
            params.push(param.value.clone());
        }

        for array in self.arrays() {
            args.push(array.declaration(params.len() + 1));
            params.extend(array.values().iter().cloned());
        }

        BoundStatement {
            sql: format!("SELECT * FROM {}({});", self.function, args.join(", ")),
            params,
        }
    }
}
