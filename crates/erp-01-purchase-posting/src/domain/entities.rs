//! Core entities for purchase posting
//!
//! Plain transaction record shapes. Validation lives in the gateway, so
//! nothing here rejects a value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::TransactionId;

/// Document header of a purchase transaction
///
/// Office, user and login identifiers are not part of the header; they
/// travel separately as a [`shared_types::UserContext`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Book name, e.g. "Purchase"
    pub book: String,
    /// Value date of the posting
    pub value_date: NaiveDate,
    pub cost_center_id: i32,
    /// Short reference number (up to 12 characters)
    #[serde(default)]
    pub reference_number: String,
    /// Free-text statement reference
    #[serde(default)]
    pub statement_reference: String,
    /// Credit purchase when true, cash purchase otherwise
    #[serde(default)]
    pub is_credit: bool,
    /// Supplier party code (up to 12 characters)
    pub party_code: String,
    /// Price type; `0` means unset
    #[serde(default)]
    pub price_type_id: Option<i32>,
    /// Shipper; `0` means unset
    #[serde(default)]
    pub shipper_id: Option<i32>,
    pub store_id: i32,
}

impl TransactionHeader {
    pub fn new(book: impl Into<String>, value_date: NaiveDate, party_code: impl Into<String>, store_id: i32) -> Self {
        Self {
            book: book.into(),
            value_date,
            cost_center_id: 0,
            reference_number: String::new(),
            statement_reference: String::new(),
            is_credit: false,
            party_code: party_code.into(),
            price_type_id: None,
            shipper_id: None,
            store_id,
        }
    }

    pub fn with_cost_center(mut self, cost_center_id: i32) -> Self {
        self.cost_center_id = cost_center_id;
        self
    }

    pub fn with_reference(mut self, reference_number: impl Into<String>, statement_reference: impl Into<String>) -> Self {
        self.reference_number = reference_number.into();
        self.statement_reference = statement_reference.into();
        self
    }

    pub fn with_credit(mut self, is_credit: bool) -> Self {
        self.is_credit = is_credit;
        self
    }

    pub fn with_price_type(mut self, price_type_id: i32) -> Self {
        self.price_type_id = Some(price_type_id);
        self
    }

    pub fn with_shipper(mut self, shipper_id: i32) -> Self {
        self.shipper_id = Some(shipper_id);
        self
    }
}

/// One stock movement line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub store_id: i32,
    pub item_code: String,
    pub quantity: i32,
    pub unit_name: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub shipping_charge: Decimal,
    #[serde(default)]
    pub tax_form: String,
    #[serde(default)]
    pub tax: Decimal,
}

impl LineItem {
    pub fn new(
        store_id: i32,
        item_code: impl Into<String>,
        quantity: i32,
        unit_name: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            store_id,
            item_code: item_code.into(),
            quantity,
            unit_name: unit_name.into(),
            price,
            discount: Decimal::ZERO,
            shipping_charge: Decimal::ZERO,
            tax_form: String::new(),
            tax: Decimal::ZERO,
        }
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_shipping_charge(mut self, shipping_charge: Decimal) -> Self {
        self.shipping_charge = shipping_charge;
        self
    }

    pub fn with_tax(mut self, tax_form: impl Into<String>, tax: Decimal) -> Self {
        self.tax_form = tax_form.into();
        self.tax = tax;
        self
    }
}

/// Reference to a stored file attached to the transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub comment: String,
    pub file_path: String,
    pub original_file_name: String,
}

impl Attachment {
    pub fn new(file_path: impl Into<String>, original_file_name: impl Into<String>) -> Self {
        Self {
            comment: String::new(),
            file_path: file_path.into(),
            original_file_name: original_file_name.into(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A composite purchase transaction as handed to the gateway
///
/// Every part is optional on input: a missing header or missing line items
/// is a skip, missing attachments or links are treated as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub header: Option<TransactionHeader>,
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
    /// Prior transactions this one links to, e.g. the purchase a return reverses
    #[serde(default)]
    pub related_transaction_ids: Option<Vec<TransactionId>>,
}

impl Submission {
    pub fn new(header: TransactionHeader, line_items: Vec<LineItem>) -> Self {
        Self {
            header: Some(header),
            line_items: Some(line_items),
            attachments: None,
            related_transaction_ids: None,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn with_related(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.related_transaction_ids = Some(ids.into_iter().map(TransactionId).collect());
        self
    }

    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    pub fn related_transaction_ids(&self) -> &[TransactionId] {
        self.related_transaction_ids.as_deref().unwrap_or_default()
    }
}
