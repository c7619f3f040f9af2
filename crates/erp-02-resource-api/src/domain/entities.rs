//! Resource entities and metadata shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ports::Entity;

/// Key/label pair for lookups and drop-downs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub key: String,
    pub value: String,
}

/// User-defined field attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub field_name: String,
    pub data_type: String,
    #[serde(default)]
    pub description: String,
}

impl CustomField {
    pub fn new(field_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            data_type: data_type.into(),
            description: String::new(),
        }
    }
}

/// Cash or bank receipt from a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerReceipt {
    /// Assigned on add; ignored in request bodies
    #[serde(default)]
    pub receipt_id: i64,
    pub transaction_master_id: i64,
    pub customer_id: i64,
    pub currency_code: String,
    #[serde(default)]
    pub er_debit: Decimal,
    #[serde(default)]
    pub er_credit: Decimal,
    #[serde(default)]
    pub cash_repository_id: Option<i32>,
    pub posted_date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub collected_on_bank_id: Option<i32>,
    #[serde(default)]
    pub collected_bank_instrument_code: Option<String>,
    #[serde(default)]
    pub collected_bank_transaction_code: Option<String>,
}

impl Entity for CustomerReceipt {
    const SCHEMA: &'static str = "transactions";
    const RESOURCE: &'static str = "customer-receipt";
    const PRIMARY_KEY: &'static str = "receipt_id";

    fn key(&self) -> i64 {
        self.receipt_id
    }

    fn set_key(&mut self, key: i64) {
        self.receipt_id = key;
    }

    fn display_value(&self) -> String {
        format!("{} {} ({})", self.currency_code, self.amount, self.posted_date)
    }
}
