use crate::domain::card::CardData;
use crate::domain::partner::{FeePolicy, Partner};
use crate::domain::payment::{Payment, PaymentStatus, PaymentSummary};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Read-only partner lookup.
#[async_trait]
pub trait PartnerDirectory: Send + Sync {
    async fn find_by_id(&self, partner_id: i64) -> Result<Option<Partner>>;
}

/// Point-in-time fee schedule lookup.
#[async_trait]
pub trait FeePolicyResolver: Send + Sync {
    /// Returns the policy effective for the partner at `at`, if any.
    async fn effective_policy(
        &self,
        partner_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<FeePolicy>>;
}

/// Position of a row in the `(created_at desc, id desc)` ordering; the
/// decoded form of a pagination cursor.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CursorPosition {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

/// Store-facing page query: filter predicate plus pagination window.
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub partner_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub cursor: Option<CursorPosition>,
    pub limit: usize,
}

/// The same filter predicate without any pagination bound. Summaries are
/// always computed over the full matching set.
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub partner_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// One page of payments in `(created_at desc, id desc)` order.
#[derive(Debug, Clone)]
pub struct PaymentPage {
    pub items: Vec<Payment>,
    pub has_next: bool,
    /// Position of the last returned row; feeds the next-page cursor.
    pub next_cursor: Option<CursorPosition>,
}

/// Persistence port for payment records. One atomic insert per payment; no
/// read-modify-write anywhere in the core.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a new record and returns it with its assigned id.
    async fn save(&self, payment: Payment) -> Result<Payment>;
    async fn find_page(&self, query: &PaymentQuery) -> Result<PaymentPage>;
    async fn summarize(&self, filter: &SummaryFilter) -> Result<PaymentSummary>;
}

/// A generic approval request, translated per provider by the adapter.
#[derive(Debug, Clone)]
pub struct ApprovalRequest {
    pub partner_id: i64,
    pub amount: Decimal,
    pub card_data: CardData,
}

/// Normalized provider approval.
#[derive(Debug, PartialEq, Clone)]
pub struct ApprovalResult {
    pub approval_code: String,
    pub approved_at: DateTime<Utc>,
    pub card_bin: Option<String>,
    pub card_last4: Option<String>,
}

/// A payment-gateway client. Implementations are stateless after
/// construction and safe to share across concurrent requests.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Whether this adapter handles the given partner.
    fn supports(&self, partner_id: i64) -> bool;

    /// Dispatches the approval call. The only operation in the core that
    /// blocks on external I/O; no internal timeout or retry.
    async fn approve(
        &self,
        request: &ApprovalRequest,
    ) -> std::result::Result<ApprovalResult, ProviderError>;
}

pub type PartnerDirectoryBox = Box<dyn PartnerDirectory>;
pub type FeePolicyResolverBox = Box<dyn FeePolicyResolver>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type ProviderAdapterBox = Box<dyn ProviderAdapter>;
