use crate::domain::card::CardData;
use crate::domain::ports::{ApprovalRequest, ApprovalResult, ProviderAdapter};
use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::info;

/// Offline gateway for local development partners. Synthesizes an approval
/// without any network call; the card is already reduced to BIN + last 4,
/// which are echoed back for reporting.
pub struct MockProvider {
    partner_id: i64,
}

impl MockProvider {
    pub fn new(partner_id: i64) -> Self {
        Self { partner_id }
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn supports(&self, partner_id: i64) -> bool {
        partner_id == self.partner_id
    }

    async fn approve(
        &self,
        request: &ApprovalRequest,
    ) -> Result<ApprovalResult, ProviderError> {
        info!(partner_id = request.partner_id, %request.amount, "mock approval");

        let CardData::Mock {
            card_bin,
            card_last4,
            ..
        } = &request.card_data
        else {
            return Err(ProviderError::Rejected {
                error_code: "UNSUPPORTED_CARD_DATA".into(),
                message: "mock gateway requires mock card data".into(),
                reference_id: None,
            });
        };

        let approval_code = format!("MOCK{:06}", rand::thread_rng().gen_range(0..1_000_000));
        Ok(ApprovalResult {
            approval_code,
            approved_at: Utc::now(),
            card_bin: Some(card_bin.clone()),
            card_last4: Some(card_last4.clone()),
        })
    }
}
