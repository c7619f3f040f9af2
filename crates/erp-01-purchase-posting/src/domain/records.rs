//! Record layouts for the three array parameters
//!
//! Each collection kind describes its elements once, as a [`RecordLayout`],
//! and flattens a record into scalars in that same field order.

use crate::domain::entities::{Attachment, LineItem};
use crate::domain::value_objects::{ElementForm, FieldSpec, RecordLayout, ScalarKind, SqlValue};
use shared_types::TransactionId;

/// A record that can be bound as one element of an array parameter
pub trait ArrayRecord {
    const LAYOUT: RecordLayout;

    /// Scalars in layout field order
    fn field_values(&self) -> Vec<SqlValue>;
}

const LINE_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("store_id", ScalarKind::Integer, "integer"),
    FieldSpec::varchar("item_code", 12, "national character varying(12)"),
    FieldSpec::new("quantity", ScalarKind::Integer, "integer"),
    FieldSpec::varchar("unit_name", 50, "national character varying(50)"),
    FieldSpec::new("price", ScalarKind::Numeric, "numeric"),
    FieldSpec::new("discount", ScalarKind::Numeric, "numeric"),
    FieldSpec::new("shipping_charge", ScalarKind::Numeric, "numeric"),
    FieldSpec::varchar("tax_form", 24, "national character varying(24)"),
    FieldSpec::new("tax", ScalarKind::Numeric, "numeric"),
];

impl ArrayRecord for LineItem {
    const LAYOUT: RecordLayout = RecordLayout {
        collection: "line_items",
        element_type: "transactions.stock_detail_type",
        form: ElementForm::Composite,
        fields: LINE_ITEM_FIELDS,
    };

    fn field_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.store_id),
            SqlValue::text(&self.item_code),
            SqlValue::Integer(self.quantity),
            SqlValue::text(&self.unit_name),
            SqlValue::Numeric(self.price),
            SqlValue::Numeric(self.discount),
            SqlValue::Numeric(self.shipping_charge),
            SqlValue::text(&self.tax_form),
            SqlValue::Numeric(self.tax),
        ]
    }
}

const ATTACHMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("comment", ScalarKind::Text, "text"),
    FieldSpec::new("file_path", ScalarKind::Text, "text"),
    FieldSpec::new("original_file_name", ScalarKind::Text, "text"),
];

impl ArrayRecord for Attachment {
    const LAYOUT: RecordLayout = RecordLayout {
        collection: "attachments",
        element_type: "core.attachment_type",
        form: ElementForm::Composite,
        fields: ATTACHMENT_FIELDS,
    };

    fn field_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::text(&self.comment),
            SqlValue::text(&self.file_path),
            SqlValue::text(&self.original_file_name),
        ]
    }
}

const RELATED_ID_FIELDS: &[FieldSpec] = &[FieldSpec::new("transaction_master_id", ScalarKind::BigInt, "bigint")];

impl ArrayRecord for TransactionId {
    const LAYOUT: RecordLayout = RecordLayout {
        collection: "related_transaction_ids",
        element_type: "bigint",
        form: ElementForm::Scalar,
        fields: RELATED_ID_FIELDS,
    };

    fn field_values(&self) -> Vec<SqlValue> {
        vec![SqlValue::BigInt(self.value())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn assert_matches_layout<R: ArrayRecord>(record: &R) {
        let values = record.field_values();
        assert_eq!(values.len(), R::LAYOUT.arity());
        for (value, spec) in values.iter().zip(R::LAYOUT.fields) {
            assert_eq!(value.kind(), spec.kind, "{}", spec.name);
        }
    }

    #[test]
    fn test_line_item_values_follow_layout() {
        let item = LineItem::new(7, "ITM-1", 2, "Piece", Decimal::new(1050, 2)).with_tax("VAT", Decimal::new(13, 0));
        assert_matches_layout(&item);
        assert_eq!(LineItem::LAYOUT.arity(), 9);
        assert_eq!(item.field_values()[1], SqlValue::text("ITM-1"));
    }

    #[test]
    fn test_attachment_values_follow_layout() {
        let attachment = Attachment::new("/files/a.pdf", "invoice.pdf").with_comment("scan");
        assert_matches_layout(&attachment);
        assert_eq!(attachment.field_values()[0], SqlValue::text("scan"));
    }

    #[test]
    fn test_related_id_is_scalar() {
        assert_eq!(TransactionId::LAYOUT.form, ElementForm::Scalar);
        assert_matches_layout(&TransactionId(101));
    }
}
