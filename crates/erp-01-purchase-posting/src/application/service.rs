//! Purchase Posting Service
//!
//! Main service implementing PurchasePostingApi.

use crate::algorithms::array_encoder::ArrayParameterEncoder;
use crate::algorithms::result_resolver::resolve_transaction_id;
use crate::config::PostingConfig;
use crate::domain::entities::{Attachment, LineItem, Submission, TransactionHeader};
use crate::domain::errors::{EncodingError, PostingError};
use crate::domain::null_policy::{HeaderField, NullSentinelPolicy};
use crate::domain::outcome::{PreconditionNotMet, SubmissionOutcome};
use crate::domain::request::{HeaderParameter, PostingRequest};
use crate::domain::value_objects::SqlValue;
use crate::ports::inbound::PurchasePostingApi;
use crate::ports::outbound::LedgerPostingService;
use async_trait::async_trait;
use shared_types::{TransactionId, UserContext};

use tracing::{debug, error, info, warn};

/// Purchase Posting Service
///
/// Orchestrates one submission:
/// 1. Check preconditions (header, non-empty line items)
/// 2. Apply the null policy to header fields
/// 3. Encode related ids, line items and attachments
/// 4. Post once to the ledger
/// 5. Resolve the reply into an identifier
///
/// Holds no per-submission state; one instance serves concurrent callers.
pub struct PurchasePostingService<L> {
    ledger: L,
    config: PostingConfig,
    policy: NullSentinelPolicy,
}

impl<L: LedgerPostingService> PurchasePostingService<L> {
    /// Create a new service with default config
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, PostingConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(ledger: L, config: PostingConfig) -> Self {
        Self {
            ledger,
            config,
            policy: NullSentinelPolicy::purchase(),
        }
    }

    pub fn config(&self) -> &PostingConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Header and line items, or the reason to skip
    pub fn check_preconditions<'a>(
        &self,
        submission: &'a Submission,
    ) -> Result<(&'a TransactionHeader, &'a [LineItem]), PreconditionNotMet> {
        let header = submission.header.as_ref().ok_or(PreconditionNotMet::MissingHeader)?;
        let line_items = submission
            .line_items
            .as_deref()
            .ok_or(PreconditionNotMet::MissingLineItems)?;
        if line_items.is_empty() {
            return Err(PreconditionNotMet::EmptyLineItems);
        }
        Ok((header, line_items))
    }

    /// Assemble the ledger request without sending it
    pub fn build_request(
        &self,
        context: &UserContext,
        header: &TransactionHeader,
        line_items: &[LineItem],
        attachments: &[Attachment],
        related_ids: &[TransactionId],
    ) -> Result<PostingRequest, PostingError> {
        let related_transaction_ids =
            ArrayParameterEncoder::<TransactionId>::with_element_type(self.config.related_id_type.as_str())
                .encode(related_ids)?;
        let line_items =
            ArrayParameterEncoder::<LineItem>::with_element_type(self.config.line_item_type.as_str()).encode(line_items)?;
        let attachments = ArrayParameterEncoder::<Attachment>::with_element_type(self.config.attachment_type.as_str())
            .encode(attachments)?;

        Ok(PostingRequest {
            function: self.config.function.clone(),
            header: self.header_parameters(context, header)?,
            related_transaction_ids,
            line_items,
            attachments,
        })
    }

    fn header_parameters(
        &self,
        context: &UserContext,
        header: &TransactionHeader,
    ) -> Result<Vec<HeaderParameter>, EncodingError> {
        for (field, text) in [
            (HeaderField::BookName, &header.book),
            (HeaderField::ReferenceNumber, &header.reference_number),
            (HeaderField::PartyCode, &header.party_code),
        ] {
            if let Some(max) = field.max_len() {
                let len = text.chars().count();
                if len > max {
                    return Err(EncodingError::TooLong {
                        collection: "header",
                        index: 0,
                        field: field.name(),
                        len,
                        max,
                    });
                }
            }
        }

        Ok(HeaderField::CALL_ORDER
            .iter()
            .map(|&field| {
                let value = match field {
                    HeaderField::BookName => SqlValue::text(&header.book),
                    HeaderField::OfficeId => self.policy.apply(field, Some(context.office_id)),
                    HeaderField::UserId => self.policy.apply(field, Some(context.user_id)),
                    HeaderField::LoginId => SqlValue::BigInt(context.login_id),
                    HeaderField::ValueDate => SqlValue::Date(header.value_date),
                    HeaderField::CostCenterId => self.policy.apply(field, Some(header.cost_center_id)),
                    HeaderField::ReferenceNumber => SqlValue::text(&header.reference_number),
                    HeaderField::StatementReference => SqlValue::text(&header.statement_reference),
                    HeaderField::IsCredit => SqlValue::Boolean(header.is_credit),
                    HeaderField::PartyCode => SqlValue::text(&header.party_code),
                    HeaderField::PriceTypeId => self.policy.apply(field, header.price_type_id),
                    HeaderField::ShipperId => self.policy.apply(field, header.shipper_id),
                    HeaderField::StoreId => self.policy.apply(field, Some(header.store_id)),
                };
                HeaderParameter { field, value }
            })
            .collect())
    }
}

#[async_trait]
impl<L: LedgerPostingService> PurchasePostingApi for PurchasePostingService<L> {
    async fn submit(&self, context: &UserContext, submission: &Submission) -> Result<SubmissionOutcome, PostingError> {
        // 1. Preconditions
        let (header, line_items) = match self.check_preconditions(submission) {
            Ok(parts) => parts,
            Err(reason) => {
                info!("[erp-01] Submission skipped: {}", reason);
                return Ok(SubmissionOutcome::NotSubmitted(reason));
            }
        };

        // 2-3. Null policy and encoding
        let request = self
            .build_request(
                context,
                header,
                line_items,
                submission.attachments(),
                submission.related_transaction_ids(),
            )
            .map_err(|e| {
                warn!("[erp-01] Encoding failed: {}", e);
                e
            })?;

        debug!(
            book = %header.book,
            office_id = context.office_id,
            line_items = request.line_items.len(),
            attachments = request.attachments.len(),
            related = request.related_transaction_ids.len(),
            "[erp-01] Posting to {}",
            request.function
        );

        // 4. Single atomic post
        let reply = self.ledger.post(&request).await.map_err(|e| {
            error!("[erp-01] Ledger posting failed: {}", e);
            PostingError::PostingFailed(e)
        })?;

        // 5. Resolve
        match resolve_transaction_id(&reply) {
            Ok(id) => {
                info!(
                    transaction_id = id.value(),
                    "[erp-01] Posted {} with {} line items",
                    header.book,
                    request.line_items.len()
                );
                Ok(SubmissionOutcome::Posted(id))
            }
            Err(failure) => {
                warn!("[erp-01] Posting reply unresolved: {}", failure);
                Ok(SubmissionOutcome::Unresolved(failure))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LedgerError;
    use crate::domain::value_objects::{ScalarKind, ScalarReply};
    use crate::ports::outbound::mocks::RecordingLedger;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn context() -> UserContext {
        UserContext::new(2, 5, 900)
    }

    fn header() -> TransactionHeader {
        TransactionHeader::new("Purchase", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "P001", 7)
            .with_price_type(0)
            .with_shipper(3)
    }

    fn line(code: &str) -> LineItem {
        LineItem::new(7, code, 1, "Piece", Decimal::new(500, 2))
    }

    #[tokio::test]
    async fn test_missing_header_skips() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("1"));
        let submission = Submission {
            line_items: Some(vec![line("A")]),
            ..Default::default()
        };

        let outcome = service.submit(&context(), &submission).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::NotSubmitted(PreconditionNotMet::MissingHeader));
        assert_eq!(service.ledger().call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_and_empty_line_items_skip() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("1"));

        let missing = Submission {
            header: Some(header()),
            ..Default::default()
        };
        let empty = Submission::new(header(), vec![]);

        assert_eq!(
            service.submit(&context(), &missing).await.unwrap(),
            SubmissionOutcome::NotSubmitted(PreconditionNotMet::MissingLineItems)
        );
        assert_eq!(
            service.post_purchase(&context(), &empty).await.unwrap(),
            TransactionId::NONE
        );
        assert_eq!(service.ledger().call_count(), 0);
    }

    #[tokio::test]
    async fn test_posts_once_and_resolves() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("42"));
        let submission = Submission::new(header(), vec![line("A"), line("B")]);

        let id = service.post_purchase(&context(), &submission).await.unwrap();

        assert_eq!(id, TransactionId(42));
        assert_eq!(service.ledger().call_count(), 1);
    }

    #[tokio::test]
    async fn test_header_in_call_order_with_context() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("42"));
        let submission = Submission::new(header(), vec![line("A")]);
        service.submit(&context(), &submission).await.unwrap();

        let request = service.ledger().last_request().unwrap();
        let fields: Vec<HeaderField> = request.header.iter().map(|p| p.field).collect();
        assert_eq!(fields, HeaderField::CALL_ORDER.to_vec());
        assert_eq!(request.header_value(HeaderField::OfficeId), Some(&SqlValue::Integer(2)));
        assert_eq!(request.header_value(HeaderField::LoginId), Some(&SqlValue::BigInt(900)));
        assert_eq!(
            request.header_value(HeaderField::PriceTypeId),
            Some(&SqlValue::Null(ScalarKind::Integer))
        );
        assert_eq!(request.header_value(HeaderField::ShipperId), Some(&SqlValue::Integer(3)));
    }

    #[tokio::test]
    async fn test_unparsable_reply_is_unresolved() {
        let service = PurchasePostingService::new(RecordingLedger::replying(ScalarReply::Text("n/a".into())));
        let submission = Submission::new(header(), vec![line("A")]);

        let outcome = service.submit(&context(), &submission).await.unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Unresolved(_)));
        assert_eq!(outcome.transaction_id(), TransactionId::NONE);
        assert_eq!(service.ledger().call_count(), 1);
    }

    #[tokio::test]
    async fn test_ledger_failure_propagates() {
        let error = LedgerError::Rejected {
            code: Some("23503".into()),
            message: "store does not exist".into(),
        };
        let service = PurchasePostingService::new(RecordingLedger::failing(error.clone()));
        let submission = Submission::new(header(), vec![line("A")]);

        let result = service.post_purchase(&context(), &submission).await;

        assert_eq!(result, Err(PostingError::PostingFailed(error)));
    }

    #[tokio::test]
    async fn test_encoding_failure_skips_ledger() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("1"));
        let submission = Submission::new(header(), vec![line("A"), line("CODE-TOO-LONG-FOR-COLUMN")]);

        let err = service.submit(&context(), &submission).await.unwrap_err();

        match err {
            PostingError::Encoding(e) => assert_eq!((e.index(), e.field()), (1, Some("item_code"))),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(service.ledger().call_count(), 0);
    }

    #[tokio::test]
    async fn test_header_text_over_column_limit_is_encoding_error() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("1"));
        let long_book = TransactionHeader::new("B".repeat(49), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "P001", 7);
        let long_reference = header().with_reference("REF-2024-000001", "");

        for header in [long_book, long_reference] {
            let submission = Submission::new(header, vec![line("A")]);
            let err = service.submit(&context(), &submission).await.unwrap_err();
            assert!(matches!(
                err,
                PostingError::Encoding(EncodingError::TooLong { collection: "header", .. })
            ));
        }
        assert_eq!(service.ledger().call_count(), 0);
    }

    #[test]
    fn test_header_text_at_column_limit_is_accepted() {
        let service = PurchasePostingService::new(RecordingLedger::replying_text("1"));
        let header = TransactionHeader::new("B".repeat(48), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "P00000000001", 7)
            .with_reference("REF-00000001", "");

        let request = service.build_request(&context(), &header, &[line("A")], &[], &[]);

        assert!(request.is_ok());
    }

    #[tokio::test]
    async fn test_config_overrides_function_and_types() {
        let config = PostingConfig {
            function: "ledger.post_purchase".into(),
            attachment_type: "ledger.attachment_type".into(),
            ..Default::default()
        };
        let service = PurchasePostingService::with_config(RecordingLedger::replying_text("9"), config);
        let submission = Submission::new(header(), vec![line("A")]);
        service.submit(&context(), &submission).await.unwrap();

        let request = service.ledger().last_request().unwrap();
        assert_eq!(request.function, "ledger.post_purchase");
        assert_eq!(request.attachments.element_type(), "ledger.attachment_type");
    }
}
