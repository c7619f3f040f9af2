//! # Purchase Posting Gateway Tests
//!
//! End-to-end behaviour of the gateway against a recording ledger double.
//!
//! ## Coverage
//!
//! 1. Skips: absent header, absent or empty line items never reach the ledger
//! 2. Null policy on the assembled request
//! 3. Array shapes and ordering in the rendered statement
//! 4. Reply resolution and failure propagation
//! 5. Header text limits
//! 6. Encoder layout properties (proptest)

use std::sync::Arc;

use chrono::NaiveDate;
use erp_01_purchase_posting::ports::outbound::mocks::RecordingLedger;
use erp_01_purchase_posting::{
    ArrayParameterEncoder, ArrayRecord, Attachment, HeaderField, LedgerError, LineItem, PostingError,
    PreconditionNotMet, PurchasePostingApi, PurchasePostingService, ScalarKind, ScalarReply, SqlValue, Submission,
    SubmissionOutcome, TransactionHeader,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared_types::{TransactionId, UserContext};

// =============================================================================
// TEST HELPERS
// =============================================================================

fn context() -> UserContext {
    UserContext::new(1, 2, 3001)
}

fn purchase_header() -> TransactionHeader {
    TransactionHeader::new("Purchase", NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(), "P001", 7)
        .with_price_type(0)
        .with_shipper(3)
        .with_credit(false)
}

fn line(code: &str, quantity: i32) -> LineItem {
    LineItem::new(7, code, quantity, "Piece", Decimal::new(2500, 2))
}

fn gateway(ledger: RecordingLedger) -> (Arc<RecordingLedger>, PurchasePostingService<Arc<RecordingLedger>>) {
    let ledger = Arc::new(ledger);
    (ledger.clone(), PurchasePostingService::new(ledger))
}

// =============================================================================
// PRECONDITIONS
// =============================================================================

#[tokio::test]
async fn test_absent_header_returns_zero_without_call() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("42"));
    let submission = Submission {
        header: None,
        line_items: Some(vec![line("A", 1)]),
        ..Default::default()
    };

    let id = service.post_purchase(&context(), &submission).await.unwrap();

    assert_eq!(id, TransactionId::NONE);
    assert_eq!(ledger.call_count(), 0);
}

#[tokio::test]
async fn test_empty_line_items_return_zero_without_call() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("42"));
    let submission = Submission::new(purchase_header(), vec![]);

    let outcome = service.submit(&context(), &submission).await.unwrap();

    assert_eq!(outcome, SubmissionOutcome::NotSubmitted(PreconditionNotMet::EmptyLineItems));
    assert_eq!(outcome.transaction_id(), TransactionId::NONE);
    assert_eq!(ledger.call_count(), 0);
}

// =============================================================================
// POSTING
// =============================================================================

#[tokio::test]
async fn test_purchase_scenario() {
    // Arrange
    let (ledger, service) = gateway(RecordingLedger::replying_text("555"));
    let submission = Submission::new(purchase_header(), vec![line("ITEM-1", 2), line("ITEM-2", 5)]).with_related([101]);

    // Act
    let id = service.post_purchase(&context(), &submission).await.unwrap();

    // Assert
    assert_eq!(id, TransactionId(555));
    assert_eq!(ledger.call_count(), 1);

    let request = ledger.last_request().unwrap();
    assert_eq!(
        request.header_value(HeaderField::PriceTypeId),
        Some(&SqlValue::Null(ScalarKind::Integer))
    );
    assert_eq!(request.header_value(HeaderField::ShipperId), Some(&SqlValue::Integer(3)));
    assert_eq!(request.header_value(HeaderField::StoreId), Some(&SqlValue::Integer(7)));
    assert_eq!(request.header_value(HeaderField::IsCredit), Some(&SqlValue::Boolean(false)));
    assert_eq!(request.header_value(HeaderField::PartyCode), Some(&SqlValue::text("P001")));
    assert_eq!(request.line_items.len(), 2);
    assert_eq!(request.attachments.len(), 0);
    assert_eq!(request.related_transaction_ids.values(), &[SqlValue::BigInt(101)]);
    assert_eq!(request.line_items.value(0, 1), Some(&SqlValue::text("ITEM-1")));
    assert_eq!(request.line_items.value(1, 1), Some(&SqlValue::text("ITEM-2")));
}

#[tokio::test]
async fn test_rendered_statement_orders_placeholders() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("555"));
    let submission = Submission::new(purchase_header(), vec![line("ITEM-1", 2)]).with_related([101]);
    service.submit(&context(), &submission).await.unwrap();

    let statement = ledger.last_request().unwrap().to_statement();

    // 13 header scalars, 1 related id, 9 line item fields, no attachments
    assert_eq!(statement.params.len(), 13 + 1 + 9);
    assert!(statement.sql.starts_with(
        "SELECT * FROM transactions.post_purchase($1::national character varying(48), $2::integer, $3::integer, $4::bigint, $5::date"
    ));
    assert!(statement.sql.contains("ARRAY[$14::bigint]::bigint[]"));
    assert!(statement
        .sql
        .contains("ARRAY[ROW($15::integer, $16::national character varying(12), $17::integer"));
    assert!(statement.sql.ends_with("ARRAY[]::core.attachment_type[]);"));
    assert_eq!(statement.params[10], SqlValue::Null(ScalarKind::Integer));
    assert_eq!(statement.params[13], SqlValue::BigInt(101));
    assert_eq!(statement.params[14], SqlValue::Integer(7));
}

#[tokio::test]
async fn test_attachments_follow_line_items() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("8"));
    let submission = Submission::new(purchase_header(), vec![line("A", 1)])
        .with_attachments(vec![Attachment::new("/files/1.pdf", "invoice.pdf").with_comment("scan")]);
    service.submit(&context(), &submission).await.unwrap();

    let statement = ledger.last_request().unwrap().to_statement();

    assert_eq!(statement.params.len(), 13 + 9 + 3);
    assert!(statement.sql.contains("ARRAY[]::bigint[]"));
    assert!(statement
        .sql
        .contains("ROW($23::text, $24::text, $25::text)::core.attachment_type"));
    assert_eq!(statement.params[22], SqlValue::text("scan"));
}

#[tokio::test]
async fn test_non_numeric_reply_resolves_to_zero() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("not-an-id"));
    let submission = Submission::new(purchase_header(), vec![line("A", 1)]);

    let outcome = service.submit(&context(), &submission).await.unwrap();

    assert!(matches!(outcome, SubmissionOutcome::Unresolved(_)));
    assert_eq!(outcome.transaction_id(), TransactionId::NONE);
    assert_eq!(ledger.call_count(), 1);
}

#[tokio::test]
async fn test_integer_reply_resolves() {
    let (_, service) = gateway(RecordingLedger::replying(ScalarReply::Integer(77)));
    let submission = Submission::new(purchase_header(), vec![line("A", 1)]);

    assert_eq!(
        service.post_purchase(&context(), &submission).await.unwrap(),
        TransactionId(77)
    );
}

#[tokio::test]
async fn test_service_failure_is_not_zero() {
    let (ledger, service) = gateway(RecordingLedger::failing(LedgerError::Unavailable(
        "connection refused".into(),
    )));
    let submission = Submission::new(purchase_header(), vec![line("A", 1)]);

    let result = service.post_purchase(&context(), &submission).await;

    assert!(matches!(
        result,
        Err(PostingError::PostingFailed(LedgerError::Unavailable(_)))
    ));
    assert_eq!(ledger.call_count(), 1);
}

#[tokio::test]
async fn test_oversized_party_code_never_reaches_ledger() {
    let (ledger, service) = gateway(RecordingLedger::replying_text("42"));
    let mut header = purchase_header();
    header.party_code = "SUPPLIER-0000001".into();
    let submission = Submission::new(header, vec![line("A", 1)]);

    let result = service.post_purchase(&context(), &submission).await;

    match result {
        Err(PostingError::Encoding(e)) => assert_eq!(e.field(), Some("party_code")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(ledger.call_count(), 0);
}

// =============================================================================
// ENCODER PROPERTIES
// =============================================================================

fn arb_line_item() -> impl Strategy<Value = LineItem> {
    (1..100i32, "[A-Z0-9]{1,12}", 0..1000i32, "[a-z]{1,10}", 0..100_000i64).prop_map(
        |(store, code, qty, unit, cents)| LineItem::new(store, code, qty, unit, Decimal::new(cents, 2)),
    )
}

proptest! {
    #[test]
    fn prop_flat_values_follow_record_order(items in prop::collection::vec(arb_line_item(), 0..20)) {
        let encoded = ArrayParameterEncoder::<LineItem>::new().encode(&items).unwrap();
        let k = LineItem::LAYOUT.arity();

        prop_assert_eq!(encoded.shape().len, items.len());
        prop_assert_eq!(encoded.values().len(), items.len() * k);
        for (i, item) in items.iter().enumerate() {
            for (j, value) in item.field_values().into_iter().enumerate() {
                prop_assert_eq!(&encoded.values()[i * k + j], &value);
            }
        }
    }

    #[test]
    fn prop_declaration_consumes_every_value(ids in prop::collection::vec(1..i64::MAX, 0..30)) {
        let ids: Vec<TransactionId> = ids.into_iter().map(TransactionId).collect();
        let encoded = ArrayParameterEncoder::<TransactionId>::new().encode(&ids).unwrap();
        let declaration = encoded.declaration(1);

        prop_assert_eq!(declaration.matches('$').count(), encoded.bind_count());
        prop_assert!(declaration.ends_with("]::bigint[]"));
    }
}
