use crate::domain::partner::{FeePolicy, Partner};
use crate::domain::payment::{Payment, PaymentSummary};
use crate::domain::ports::{
    CursorPosition, FeePolicyResolver, PartnerDirectory, PaymentPage, PaymentQuery, PaymentStore,
    SummaryFilter,
};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory partner directory.
///
/// Uses `Arc<RwLock<HashMap>>` for shared concurrent access. Used by tests
/// and the demo binary; production wires a database-backed adapter.
#[derive(Default, Clone)]
pub struct InMemoryPartnerDirectory {
    partners: Arc<RwLock<HashMap<i64, Partner>>>,
}

impl InMemoryPartnerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, partner: Partner) {
        let mut partners = self.partners.write().await;
        partners.insert(partner.id, partner);
    }
}

#[async_trait]
impl PartnerDirectory for InMemoryPartnerDirectory {
    async fn find_by_id(&self, partner_id: i64) -> Result<Option<Partner>> {
        let partners = self.partners.read().await;
        Ok(partners.get(&partner_id).cloned())
    }
}

/// A thread-safe in-memory fee policy store. Effective-policy selection is
/// delegated to the domain rule (latest `effective_from` not after the
/// instant, highest id on tie).
#[derive(Default, Clone)]
pub struct InMemoryFeePolicyStore {
    policies: Arc<RwLock<Vec<FeePolicy>>>,
}

impl InMemoryFeePolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, policy: FeePolicy) {
        let mut policies = self.policies.write().await;
        policies.push(policy);
    }
}

#[async_trait]
impl FeePolicyResolver for InMemoryFeePolicyStore {
    async fn effective_policy(
        &self,
        partner_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<FeePolicy>> {
        let policies = self.policies.read().await;
        Ok(FeePolicy::select_effective(&policies, partner_id, at).cloned())
    }
}

/// A thread-safe in-memory payment store implementing the full query
/// contract: `(created_at desc, id desc)` ordering, strict-after cursor
/// windowing with one-row look-ahead for `has_next`, and aggregation over
/// the unpaged filter set.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    rows: Arc<RwLock<Vec<Payment>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn matches_filter(
    p: &Payment,
    partner_id: Option<i64>,
    status: Option<crate::domain::payment::PaymentStatus>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if let Some(partner_id) = partner_id {
        if p.partner_id != partner_id {
            return false;
        }
    }
    if let Some(status) = status {
        if p.status != status {
            return false;
        }
    }
    if let Some(from) = from {
        if p.created_at < from {
            return false;
        }
    }
    if let Some(to) = to {
        if p.created_at > to {
            return false;
        }
    }
    true
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, mut payment: Payment) -> Result<Payment> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        payment.id = Some(id);
        let mut rows = self.rows.write().await;
        rows.push(payment.clone());
        Ok(payment)
    }

    async fn find_page(&self, query: &PaymentQuery) -> Result<PaymentPage> {
        let rows = self.rows.read().await;
        let mut matching: Vec<&Payment> = rows
            .iter()
            .filter(|p| matches_filter(p, query.partner_id, query.status, query.from, query.to))
            .filter(|p| match query.cursor {
                // Strictly after the cursor position in descending order.
                Some(cursor) => {
                    let id = p.id.unwrap_or(0);
                    (p.created_at, id) < (cursor.created_at, cursor.id)
                }
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| {
            (b.created_at, b.id.unwrap_or(0)).cmp(&(a.created_at, a.id.unwrap_or(0)))
        });

        let has_next = matching.len() > query.limit;
        let items: Vec<Payment> = matching.into_iter().take(query.limit).cloned().collect();
        let next_cursor = items.last().map(|p| CursorPosition {
            created_at: p.created_at,
            id: p.id.unwrap_or(0),
        });

        Ok(PaymentPage {
            items,
            has_next,
            next_cursor,
        })
    }

    async fn summarize(&self, filter: &SummaryFilter) -> Result<PaymentSummary> {
        let rows = self.rows.read().await;
        let mut summary = PaymentSummary {
            count: 0,
            total_amount: Decimal::ZERO,
            total_net_amount: Decimal::ZERO,
        };
        for p in rows
            .iter()
            .filter(|p| matches_filter(p, filter.partner_id, filter.status, filter.from, filter.to))
        {
            summary.count += 1;
            summary.total_amount += p.amount;
            summary.total_net_amount += p.net_amount;
        }
        Ok(summary)
    }
}
