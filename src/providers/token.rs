use crate::domain::card::CardData;
use crate::domain::ports::{ApprovalRequest, ApprovalResult, ProviderAdapter};
use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::info;

/// Token-based gateway. Forwards a pre-tokenized card reference; no raw
/// card data crosses this adapter, and the approval carries no
/// card_bin/card_last4 because the provider never exposes the card.
pub struct TokenProvider {
    partner_id: i64,
}

impl TokenProvider {
    pub fn new(partner_id: i64) -> Self {
        Self { partner_id }
    }
}

#[async_trait]
impl ProviderAdapter for TokenProvider {
    fn supports(&self, partner_id: i64) -> bool {
        partner_id == self.partner_id
    }

    async fn approve(
        &self,
        request: &ApprovalRequest,
    ) -> Result<ApprovalResult, ProviderError> {
        let CardData::Token {
            merchant_id,
            order_id,
            ..
        } = &request.card_data
        else {
            return Err(ProviderError::Rejected {
                error_code: "UNSUPPORTED_CARD_DATA".into(),
                message: "token gateway requires tokenized card data".into(),
                reference_id: None,
            });
        };

        info!(
            partner_id = request.partner_id,
            %request.amount,
            merchant_id,
            order_id,
            "token approval"
        );

        let approval_code = format!("TKN{:06}", rand::thread_rng().gen_range(0..1_000_000));
        Ok(ApprovalResult {
            approval_code,
            approved_at: Utc::now(),
            card_bin: None,
            card_last4: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_approve_has_no_card_fields() {
        let provider = TokenProvider::new(3);
        let request = ApprovalRequest {
            partner_id: 3,
            amount: dec!(5000),
            card_data: CardData::Token {
                encrypted_card_token: "enc_token_xxx".into(),
                merchant_id: "M001".into(),
                order_id: "ORD-001".into(),
            },
        };
        let result = provider.approve(&request).await.unwrap();
        assert!(result.approval_code.starts_with("TKN"));
        assert!(result.card_bin.is_none());
        assert!(result.card_last4.is_none());
    }

    #[tokio::test]
    async fn test_approve_rejects_raw_card_data() {
        let provider = TokenProvider::new(3);
        let request = ApprovalRequest {
            partner_id: 3,
            amount: dec!(5000),
            card_data: CardData::Mock {
                card_bin: "123456".into(),
                card_last4: "4242".into(),
                product_name: None,
            },
        };
        assert!(provider.approve(&request).await.is_err());
    }
}
