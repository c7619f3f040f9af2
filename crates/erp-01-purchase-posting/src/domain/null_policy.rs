//! Null-sentinel policy for header parameters
//!
//! Some integer header fields use `0` as "unset". The ledger treats those
//! columns as foreign keys where `0` can be a real row, so an unset value
//! has to reach it as `NULL`. Which fields behave that way is a table,
//! not control flow.

use crate::domain::value_objects::{ScalarKind, SqlValue};

/// Scalar header parameters of the posting call, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    BookName,
    OfficeId,
    UserId,
    LoginId,
    ValueDate,
    CostCenterId,
    ReferenceNumber,
    StatementReference,
    IsCredit,
    PartyCode,
    PriceTypeId,
    ShipperId,
    StoreId,
}

impl HeaderField {
    /// Positional order expected by the posting function
    pub const CALL_ORDER: [HeaderField; 13] = [
        Self::BookName,
        Self::OfficeId,
        Self::UserId,
        Self::LoginId,
        Self::ValueDate,
        Self::CostCenterId,
        Self::ReferenceNumber,
        Self::StatementReference,
        Self::IsCredit,
        Self::PartyCode,
        Self::PriceTypeId,
        Self::ShipperId,
        Self::StoreId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BookName => "book_name",
            Self::OfficeId => "office_id",
            Self::UserId => "user_id",
            Self::LoginId => "login_id",
            Self::ValueDate => "value_date",
            Self::CostCenterId => "cost_center_id",
            Self::ReferenceNumber => "reference_number",
            Self::StatementReference => "statement_reference",
            Self::IsCredit => "is_credit",
            Self::PartyCode => "party_code",
            Self::PriceTypeId => "price_type_id",
            Self::ShipperId => "shipper_id",
            Self::StoreId => "store_id",
        }
    }

    /// Character limit of the text columns
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Self::BookName => Some(48),
            Self::ReferenceNumber | Self::PartyCode => Some(12),
            _ => None,
        }
    }

    /// Cast applied to the placeholder
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::BookName => "national character varying(48)",
            Self::ReferenceNumber | Self::PartyCode => "national character varying(12)",
            Self::StatementReference => "text",
            Self::LoginId => "bigint",
            Self::ValueDate => "date",
            Self::IsCredit => "boolean",
            Self::OfficeId
            | Self::UserId
            | Self::CostCenterId
            | Self::PriceTypeId
            | Self::ShipperId
            | Self::StoreId => "integer",
        }
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::BookName | Self::ReferenceNumber | Self::StatementReference | Self::PartyCode => ScalarKind::Text,
            Self::LoginId => ScalarKind::BigInt,
            Self::ValueDate => ScalarKind::Date,
            Self::IsCredit => ScalarKind::Boolean,
            Self::OfficeId
            | Self::UserId
            | Self::CostCenterId
            | Self::PriceTypeId
            | Self::ShipperId
            | Self::StoreId => ScalarKind::Integer,
        }
    }
}

/// One row of the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullRule {
    pub field: HeaderField,
    /// Value meaning "unset"
    pub sentinel: i32,
    /// Bind the sentinel as NULL instead of a literal
    pub nullable_on_zero: bool,
}

impl NullRule {
    const fn literal(field: HeaderField) -> Self {
        Self {
            field,
            sentinel: 0,
            nullable_on_zero: false,
        }
    }

    const fn nullable(field: HeaderField) -> Self {
        Self {
            field,
            sentinel: 0,
            nullable_on_zero: true,
        }
    }
}

const PURCHASE_RULES: &[NullRule] = &[
    NullRule::literal(HeaderField::OfficeId),
    NullRule::literal(HeaderField::UserId),
    NullRule::literal(HeaderField::CostCenterId),
    NullRule::nullable(HeaderField::PriceTypeId),
    NullRule::nullable(HeaderField::ShipperId),
    NullRule::literal(HeaderField::StoreId),
];

/// Per-field translation of integer header values into bind values
#[derive(Debug, Clone, Copy)]
pub struct NullSentinelPolicy {
    rules: &'static [NullRule],
}

impl NullSentinelPolicy {
    /// Policy for the purchase posting call
    pub const fn purchase() -> Self {
        Self { rules: PURCHASE_RULES }
    }

    pub const fn from_rules(rules: &'static [NullRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [NullRule] {
        self.rules
    }

    pub fn rule(&self, field: HeaderField) -> Option<&'static NullRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    pub fn is_nullable_on_zero(&self, field: HeaderField) -> bool {
        self.rule(field).is_some_and(|r| r.nullable_on_zero)
    }

    /// Translate one integer header value.
    ///
    /// `None` is always the absence marker. The sentinel becomes the marker
    /// only on nullable fields; required fields pass it through literally.
    pub fn apply(&self, field: HeaderField, value: Option<i32>) -> SqlValue {
        match value {
            None => SqlValue::Null(ScalarKind::Integer),
            Some(v) => match self.rule(field) {
                Some(rule) if rule.nullable_on_zero && v == rule.sentinel => SqlValue::Null(ScalarKind::Integer),
                _ => SqlValue::Integer(v),
            },
        }
    }
}

impl Default for NullSentinelPolicy {
    fn default() -> Self {
        Self::purchase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_type_zero_is_absent() {
        let policy = NullSentinelPolicy::purchase();
        assert_eq!(
            policy.apply(HeaderField::PriceTypeId, Some(0)),
            SqlValue::Null(ScalarKind::Integer)
        );
    }

    #[test]
    fn test_shipper_zero_is_absent() {
        let policy = NullSentinelPolicy::purchase();
        assert!(policy.apply(HeaderField::ShipperId, Some(0)).is_null());
    }

    #[test]
    fn test_nullable_fields_pass_other_values() {
        let policy = NullSentinelPolicy::purchase();
        assert_eq!(policy.apply(HeaderField::ShipperId, Some(3)), SqlValue::Integer(3));
        assert_eq!(policy.apply(HeaderField::PriceTypeId, Some(-1)), SqlValue::Integer(-1));
    }

    #[test]
    fn test_required_fields_keep_literal_zero() {
        let policy = NullSentinelPolicy::purchase();
        for field in [
            HeaderField::OfficeId,
            HeaderField::UserId,
            HeaderField::CostCenterId,
            HeaderField::StoreId,
        ] {
            assert!(!policy.is_nullable_on_zero(field), "{}", field.name());
            assert_eq!(policy.apply(field, Some(0)), SqlValue::Integer(0));
        }
    }

    #[test]
    fn test_none_is_absent_everywhere() {
        let policy = NullSentinelPolicy::purchase();
        assert!(policy.apply(HeaderField::PriceTypeId, None).is_null());
        assert!(policy.apply(HeaderField::StoreId, None).is_null());
    }

    #[test]
    fn test_only_two_nullable_fields() {
        let nullable: Vec<_> = HeaderField::CALL_ORDER
            .iter()
            .filter(|f| NullSentinelPolicy::purchase().is_nullable_on_zero(**f))
            .collect();
        assert_eq!(nullable, vec![&HeaderField::PriceTypeId, &HeaderField::ShipperId]);
    }

    #[test]
    fn test_custom_table() {
        static RULES: [NullRule; 1] = [NullRule {
            field: HeaderField::CostCenterId,
            sentinel: -1,
            nullable_on_zero: true,
        }];
        let policy = NullSentinelPolicy::from_rules(&RULES);
        assert!(policy.apply(HeaderField::CostCenterId, Some(-1)).is_null());
        assert_eq!(policy.apply(HeaderField::CostCenterId, Some(0)), SqlValue::Integer(0));
    }
}
