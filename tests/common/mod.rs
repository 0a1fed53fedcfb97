#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use payflow::application::orchestrator::PaymentOrchestrator;
use payflow::domain::card::CardData;
use payflow::domain::partner::{FeePolicy, Partner};
use payflow::domain::ports::{
    ApprovalRequest, ApprovalResult, ProviderAdapter, ProviderAdapterBox,
};
use payflow::error::ProviderError;
use payflow::infrastructure::in_memory::{
    InMemoryFeePolicyStore, InMemoryPartnerDirectory, InMemoryPaymentStore,
};
use payflow::providers::ProviderRegistry;
use rust_decimal_macros::dec;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn mock_card() -> CardData {
    CardData::Mock {
        card_bin: "123456".into(),
        card_last4: "4242".into(),
        product_name: Some("TEST CARD".into()),
    }
}

pub fn token_card() -> CardData {
    CardData::Token {
        encrypted_card_token: "tok_test_0001".into(),
        merchant_id: "M001".into(),
        order_id: "ORD-0001".into(),
    }
}

/// Adapter that always answers with a canned outcome. Lets tests drive the
/// pipeline through every provider-side failure without a network.
pub struct ScriptedAdapter {
    pub partner_id: i64,
    pub outcome: ScriptedOutcome,
}

#[derive(Clone)]
pub enum ScriptedOutcome {
    Approve { approval_code: String },
    Reject { error_code: String, message: String },
    AuthFailure,
    Outage,
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn supports(&self, partner_id: i64) -> bool {
        partner_id == self.partner_id
    }

    async fn approve(
        &self,
        _request: &ApprovalRequest,
    ) -> Result<ApprovalResult, ProviderError> {
        match &self.outcome {
            ScriptedOutcome::Approve { approval_code } => Ok(ApprovalResult {
                approval_code: approval_code.clone(),
                approved_at: epoch(),
                card_bin: Some("123456".into()),
                card_last4: Some("4242".into()),
            }),
            ScriptedOutcome::Reject {
                error_code,
                message,
            } => Err(ProviderError::Rejected {
                error_code: error_code.clone(),
                message: message.clone(),
                reference_id: Some("ref-001".into()),
            }),
            ScriptedOutcome::AuthFailure => {
                Err(ProviderError::AuthenticationFailed("bad api key".into()))
            }
            ScriptedOutcome::Outage => {
                Err(ProviderError::ServerUnavailable("gateway down".into()))
            }
        }
    }
}

/// Orchestrator over seeded in-memory stores. Partner 1 is active with a
/// 2.35% policy, partner 2 is inactive, partner 4 is active but has no fee
/// policy, partner 5 is active with a policy but no adapter.
pub async fn build_orchestrator(
    adapters: Vec<ProviderAdapterBox>,
) -> (PaymentOrchestrator, InMemoryPaymentStore) {
    let partners = InMemoryPartnerDirectory::new();
    partners
        .insert(Partner::new(1, "PARTNER_A", "Partner A", true))
        .await;
    partners
        .insert(Partner::new(2, "PARTNER_B", "Partner B", false))
        .await;
    partners
        .insert(Partner::new(3, "PARTNER_C", "Partner C", true))
        .await;
    partners
        .insert(Partner::new(4, "PARTNER_D", "Partner D", true))
        .await;
    partners
        .insert(Partner::new(5, "PARTNER_E", "Partner E", true))
        .await;

    let policies = InMemoryFeePolicyStore::new();
    policies
        .insert(FeePolicy {
            id: 1,
            partner_id: 1,
            effective_from: epoch(),
            percentage: dec!(0.0235),
            fixed_fee: None,
        })
        .await;
    policies
        .insert(FeePolicy {
            id: 2,
            partner_id: 2,
            effective_from: epoch(),
            percentage: dec!(0.0300),
            fixed_fee: Some(dec!(100)),
        })
        .await;
    policies
        .insert(FeePolicy {
            id: 3,
            partner_id: 3,
            effective_from: epoch(),
            percentage: dec!(0.0250),
            fixed_fee: Some(dec!(50)),
        })
        .await;
    policies
        .insert(FeePolicy {
            id: 4,
            partner_id: 5,
            effective_from: epoch(),
            percentage: dec!(0.0200),
            fixed_fee: None,
        })
        .await;

    let store = InMemoryPaymentStore::new();
    let orchestrator = PaymentOrchestrator::new(
        Box::new(partners),
        Box::new(policies),
        Box::new(store.clone()),
        ProviderRegistry::new(adapters),
    );
    (orchestrator, store)
}

pub fn approving_adapter(partner_id: i64) -> ProviderAdapterBox {
    Box::new(ScriptedAdapter {
        partner_id,
        outcome: ScriptedOutcome::Approve {
            approval_code: "APPROVED01".into(),
        },
    })
}
