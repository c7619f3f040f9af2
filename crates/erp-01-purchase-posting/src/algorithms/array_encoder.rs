//! Array parameter encoder
//!
//! Turns an ordered slice of records into a typed array declaration and the
//! flat list of scalars bound into it. The value for field `j` of record `i`
//! always sits at flat index `i * arity + j`, and record `i` is element `i`
//! of the declared array. An empty slice encodes to `ARRAY[]::type[]`.
//!
//! ## Declaration forms
//!
//! - Composite: `ARRAY[ROW($1::integer, $2::text)::some_type, ...]::some_type[]`
//! - Scalar: `ARRAY[$1::bigint, $2::bigint]::bigint[]`

use std::marker::PhantomData;

use crate::domain::errors::EncodingError;
use crate::domain::records::ArrayRecord;
use crate::domain::value_objects::{ElementForm, FieldSpec, RecordLayout, SqlValue};

/// Shape of an encoded array: element type, length and per-record arity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayShape {
    pub element_type: String,
    pub form: ElementForm,
    pub len: usize,
    pub arity: usize,
}

impl ArrayShape {
    /// Stable ordinal of every element, in submission order
    pub fn ordinals(&self) -> std::ops::Range<usize> {
        0..self.len
    }

    /// Flat index of field `field` of record `ordinal`
    pub fn flat_index(&self, ordinal: usize, field: usize) -> usize {
        ordinal * self.arity + field
    }
}

/// Result of encoding one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArray {
    collection: &'static str,
    element_type: String,
    form: ElementForm,
    fields: &'static [FieldSpec],
    len: usize,
    values: Vec<SqlValue>,
}

impl EncodedArray {
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Scalars per record
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Flattened bind values
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Scalars of record `ordinal`
    pub fn record(&self, ordinal: usize) -> Option<&[SqlValue]> {
        let arity = self.arity();
        if ordinal >= self.len {
            return None;
        }
        self.values.get(ordinal * arity..(ordinal + 1) * arity)
    }

    pub fn value(&self, ordinal: usize, field: usize) -> Option<&SqlValue> {
        self.record(ordinal).and_then(|r| r.get(field))
    }

    pub fn shape(&self) -> ArrayShape {
        ArrayShape {
            element_type: self.element_type.clone(),
            form: self.form,
            len: self.len,
            arity: self.arity(),
        }
    }

    /// Number of placeholders the declaration consumes
    pub fn bind_count(&self) -> usize {
        self.values.len()
    }

    /// Render the array expression, numbering placeholders from `first_placeholder`.
    pub fn declaration(&self, first_placeholder: usize) -> String {
        let mut next = first_placeholder;
        let elements: Vec<String> = self
            .ordinals()
            .map(|_| {
                let parts: Vec<String> = self
                    .fields
                    .iter()
                    .map(|field| {
                        let placeholder = format!("${}::{}", next, field.sql_type);
                        next += 1;
                        placeholder
                    })
                    .collect();
                match self.form {
                    ElementForm::Scalar => parts.join(", "),
                    ElementForm::Composite => format!("ROW({})::{}", parts.join(", "), self.element_type),
                }
            })
            .collect();
        format!("ARRAY[{}]::{}[]", elements.join(", "), self.element_type)
    }

    fn ordinals(&self) -> std::ops::Range<usize> {
        0..self.len
    }
}

/// Encoder for one record kind
#[derive(Debug, Clone)]
pub struct ArrayParameterEncoder<R: ArrayRecord> {
    element_type: String,
    _record: PhantomData<fn(&R)>,
}

impl<R: ArrayRecord> ArrayParameterEncoder<R> {
    /// Encoder using the layout's default element type
    pub fn new() -> Self {
        Self::with_element_type(R::LAYOUT.element_type)
    }

    /// Encoder declaring a different element type, e.g. a schema-qualified override
    pub fn with_element_type(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            _record: PhantomData,
        }
    }

    pub fn layout(&self) -> RecordLayout {
        R::LAYOUT
    }

    /// Encode `records` in order. Fails on the first record whose scalars do
    /// not fit the layout.
    pub fn encode(&self, records: &[R]) -> Result<EncodedArray, EncodingError> {
        let layout = R::LAYOUT;
        let mut values = Vec::with_capacity(records.len() * layout.arity());

        for (index, record) in records.iter().enumerate() {
            let record_values = record.field_values();
            check_record(&layout, index, &record_values)?;
            values.extend(record_values);
        }

        Ok(EncodedArray {
            collection: layout.collection,
            element_type: self.element_type.clone(),
            form: layout.form,
            fields: layout.fields,
            len: records.len(),
            values,
        })
    }
}

impl<R: ArrayRecord> Default for ArrayParameterEncoder<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_record(layout: &RecordLayout, index: usize, values: &[SqlValue]) -> Result<(), EncodingError> {
    if values.len() != layout.arity() {
        return Err(EncodingError::ArityMismatch {
            collection: layout.collection,
            index,
            expected: layout.arity(),
            actual: values.len(),
        });
    }

    for (spec, value) in layout.fields.iter().zip(values) {
        if value.kind() != spec.kind {
            return Err(EncodingError::KindMismatch {
                collection: layout.collection,
                index,
                field: spec.name,
                expected: spec.kind,
                actual: value.kind(),
            });
        }
        if let (SqlValue::Text(text), Some(max)) = (value, spec.max_len) {
            let len = text.chars().count();
            if len > max {
                return Err(EncodingError::TooLong {
                    collection: layout.collection,
                    index,
                    field: spec.name,
                    len,
                    max,
                });
            }
        }
    }

    Ok(())
}
