use crate::domain::card::{CardData, CardKind};
use crate::domain::fees;
use crate::domain::payment::Payment;
use crate::domain::ports::{
    ApprovalRequest, FeePolicyResolverBox, PartnerDirectoryBox, PaymentStoreBox,
};
use crate::error::{PaymentError, ProviderError, Result};
use crate::providers::ProviderRegistry;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Input for the create-payment use case.
#[derive(Debug, Clone)]
pub struct PaymentCommand {
    pub partner_id: i64,
    pub amount: Decimal,
    pub card_data: CardData,
}

/// The create-payment use case.
///
/// Composes partner validation, fee-policy resolution, provider dispatch,
/// fee computation and persistence into a single synchronous pipeline.
/// Every step is a hard gate; there is no resumable intermediate state, so
/// a failure at any gate requires the caller to resubmit a fresh command.
pub struct PaymentOrchestrator {
    partners: PartnerDirectoryBox,
    policies: FeePolicyResolverBox,
    store: PaymentStoreBox,
    registry: ProviderRegistry,
}

impl PaymentOrchestrator {
    pub fn new(
        partners: PartnerDirectoryBox,
        policies: FeePolicyResolverBox,
        store: PaymentStoreBox,
        registry: ProviderRegistry,
    ) -> Self {
        Self {
            partners,
            policies,
            store,
            registry,
        }
    }

    /// Processes a payment end to end.
    ///
    /// Persistence rules: an approval or a business rejection each persist
    /// exactly one record; validation failures and gateway auth/outage
    /// failures persist nothing. A rejection is re-signaled to the caller
    /// after its record is saved — callers must not infer success from the
    /// existence of a record.
    pub async fn process(&self, command: PaymentCommand) -> Result<Payment> {
        if command.amount <= Decimal::ZERO {
            return Err(PaymentError::ValidationFailed(
                "amount must be positive".into(),
            ));
        }

        // 1. Partner existence and activity.
        let partner = self
            .partners
            .find_by_id(command.partner_id)
            .await?
            .ok_or(PaymentError::PartnerNotFound(command.partner_id))?;
        if !partner.active {
            return Err(PaymentError::PartnerInactive(partner.id));
        }

        // 2. Fee policy effective right now.
        let policy = self
            .policies
            .effective_policy(partner.id, Utc::now())
            .await?
            .ok_or(PaymentError::FeePolicyMissing(partner.id))?;

        // 3. Provider selection: first registered adapter claiming support.
        let adapter = self
            .registry
            .select(partner.id)
            .ok_or(PaymentError::ProviderNotFound(partner.id))?;

        // 4. Card-data variant must match the partner's static binding.
        validate_card_data(partner.id, &command.card_data)?;

        // 5. Dispatch. A rejection is recorded before re-signaling; auth
        // and outage failures leave no trace in the store.
        info!(partner_id = partner.id, %command.amount, "dispatching approval");
        let request = ApprovalRequest {
            partner_id: partner.id,
            amount: command.amount,
            card_data: command.card_data,
        };
        let approval = match adapter.approve(&request).await {
            Ok(approval) => approval,
            Err(ProviderError::Rejected {
                error_code,
                message,
                reference_id,
            }) => {
                warn!(partner_id = partner.id, %error_code, "payment rejected by provider");
                let failed = Payment::rejected(
                    partner.id,
                    command.amount,
                    policy.percentage,
                    error_code.clone(),
                    message.clone(),
                    Utc::now(),
                );
                self.store.save(failed).await?;
                return Err(PaymentError::Rejected {
                    error_code,
                    message,
                    reference_id,
                });
            }
            Err(e @ ProviderError::AuthenticationFailed(_)) => {
                warn!(partner_id = partner.id, "provider authentication failed");
                return Err(e.into());
            }
            Err(e @ ProviderError::ServerUnavailable(_)) => {
                warn!(partner_id = partner.id, "provider unavailable");
                return Err(e.into());
            }
        };

        // 6. Fee computation from the resolved policy, then persist.
        let breakdown = fees::calculate(command.amount, policy.percentage, policy.fixed_fee);
        let payment = Payment::approved(
            partner.id,
            command.amount,
            policy.percentage,
            breakdown.fee,
            breakdown.net,
            approval.approval_code,
            approval.approved_at,
            approval.card_bin,
            approval.card_last4,
        );
        let saved = self.store.save(payment).await?;
        info!(
            partner_id = partner.id,
            payment_id = saved.id,
            "payment approved"
        );
        Ok(saved)
    }
}

/// Static partner-to-variant binding. Partner ids outside the table pass
/// through: they are unreachable in practice because the partner and
/// provider gates reject unknown partners first.
fn expected_card_kind(partner_id: i64) -> Option<CardKind> {
    match partner_id {
        1 => Some(CardKind::Mock),
        2 => Some(CardKind::Encrypted),
        3 => Some(CardKind::Token),
        _ => None,
    }
}

fn validate_card_data(partner_id: i64, card_data: &CardData) -> Result<()> {
    let Some(expected) = expected_card_kind(partner_id) else {
        return Ok(());
    };
    let actual = card_data.kind();
    if actual != expected {
        return Err(PaymentError::InvalidCardData {
            partner_id,
            expected,
            actual,
        });
    }
    Ok(())
}
