use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Approved,
    Rejected,
    Canceled,
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(PaymentStatus::Approved),
            "REJECTED" => Ok(PaymentStatus::Rejected),
            "CANCELED" => Ok(PaymentStatus::Canceled),
            _ => Err(()),
        }
    }
}

/// The payment record of account. Created exactly once per orchestration
/// attempt that reaches a business outcome (approval or rejection) and
/// immutable thereafter; `id` is assigned by the store on persist.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: Option<i64>,
    pub partner_id: i64,
    pub amount: Decimal,
    pub applied_fee_rate: Decimal,
    pub fee_amount: Decimal,
    pub net_amount: Decimal,
    pub card_bin: Option<String>,
    pub card_last4: Option<String>,
    pub approval_code: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub failed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// An approved payment with fee fields already computed from the
    /// effective policy.
    #[allow(clippy::too_many_arguments)]
    pub fn approved(
        partner_id: i64,
        amount: Decimal,
        applied_fee_rate: Decimal,
        fee_amount: Decimal,
        net_amount: Decimal,
        approval_code: String,
        approved_at: DateTime<Utc>,
        card_bin: Option<String>,
        card_last4: Option<String>,
    ) -> Self {
        Self {
            id: None,
            partner_id,
            amount,
            applied_fee_rate,
            fee_amount,
            net_amount,
            card_bin,
            card_last4,
            approval_code: Some(approval_code),
            approved_at: Some(approved_at),
            status: PaymentStatus::Approved,
            failure_code: None,
            failure_message: None,
            failed_at: None,
            created_at: Utc::now(),
        }
    }

    /// A rejected payment. Fee and net are zero; the applied rate is still
    /// recorded so the rejection can be attributed to a schedule.
    pub fn rejected(
        partner_id: i64,
        amount: Decimal,
        applied_fee_rate: Decimal,
        failure_code: String,
        failure_message: String,
        failed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            partner_id,
            amount,
            applied_fee_rate,
            fee_amount: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            card_bin: None,
            card_last4: None,
            approval_code: None,
            approved_at: None,
            status: PaymentStatus::Rejected,
            failure_code: Some(failure_code),
            failure_message: Some(failure_message),
            failed_at: Some(failed_at),
            created_at: Utc::now(),
        }
    }
}

/// Aggregate over the full matching set of a query, independent of the page
/// window returned.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentSummary {
    pub count: u64,
    pub total_amount: Decimal,
    pub total_net_amount: Decimal,
}

impl PaymentSummary {
    pub fn empty() -> Self {
        Self {
            count: 0,
            total_amount: Decimal::ZERO,
            total_net_amount: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!("APPROVED".parse(), Ok(PaymentStatus::Approved));
        assert_eq!("REJECTED".parse(), Ok(PaymentStatus::Rejected));
        assert_eq!("CANCELED".parse(), Ok(PaymentStatus::Canceled));
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!("INVALID_STATUS".parse::<PaymentStatus>().is_err());
        assert!("approved".parse::<PaymentStatus>().is_err());
        assert!("".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_rejected_payment_zeroes_fee_fields() {
        let p = Payment::rejected(
            1,
            dec!(10000),
            dec!(0.0235),
            "INSUFFICIENT_LIMIT".into(),
            "limit exceeded".into(),
            Utc::now(),
        );
        assert_eq!(p.status, PaymentStatus::Rejected);
        assert_eq!(p.fee_amount, Decimal::ZERO);
        assert_eq!(p.net_amount, Decimal::ZERO);
        assert_eq!(p.applied_fee_rate, dec!(0.0235));
        assert!(p.approval_code.is_none());
        assert!(p.approved_at.is_none());
        assert!(p.failed_at.is_some());
    }

    #[test]
    fn test_approved_payment_has_no_failure_fields() {
        let p = Payment::approved(
            1,
            dec!(10000),
            dec!(0.0235),
            dec!(235),
            dec!(9765),
            "MOCK123456".into(),
            Utc::now(),
            Some("123456".into()),
            Some("4242".into()),
        );
        assert_eq!(p.status, PaymentStatus::Approved);
        assert!(p.failure_code.is_none());
        assert!(p.failed_at.is_none());
        assert!(p.id.is_none());
    }
}
