use crate::application::cursor;
use crate::domain::payment::{Payment, PaymentStatus, PaymentSummary};
use crate::domain::ports::{PaymentQuery, PaymentStoreBox, SummaryFilter};
use crate::error::Result;
use chrono::{DateTime, Utc};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Caller-facing history filter. `status` and `cursor` are raw strings and
/// deliberately lenient: an unrecognized status means "no status filter",
/// a malformed cursor means "first page".
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub partner_id: Option<i64>,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub limit: usize,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            partner_id: None,
            status: None,
            from: None,
            to: None,
            cursor: None,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Assembled history page.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub items: Vec<Payment>,
    pub summary: PaymentSummary,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

/// The history/read use case. Owns cursor semantics; the store only sees
/// decoded positions.
pub struct PaymentQueryEngine {
    store: PaymentStoreBox,
}

impl PaymentQueryEngine {
    pub fn new(store: PaymentStoreBox) -> Self {
        Self { store }
    }

    /// Runs the paging query and, independently, the aggregate over the
    /// same filter predicate without the pagination bound. The summary
    /// never varies with `limit` or cursor position for a fixed filter.
    pub async fn query(&self, filter: QueryFilter) -> Result<QueryResult> {
        let position = cursor::decode(filter.cursor.as_deref());
        let status = parse_status(filter.status.as_deref());

        let page_query = PaymentQuery {
            partner_id: filter.partner_id,
            status,
            from: filter.from,
            to: filter.to,
            cursor: position,
            limit: filter.limit,
        };
        let page = self.store.find_page(&page_query).await?;

        let summary_filter = SummaryFilter {
            partner_id: filter.partner_id,
            status,
            from: filter.from,
            to: filter.to,
        };
        let summary = self.store.summarize(&summary_filter).await?;

        let next_cursor = if page.has_next {
            page.next_cursor.as_ref().map(cursor::encode)
        } else {
            None
        };

        Ok(QueryResult {
            items: page.items,
            summary,
            next_cursor,
            has_next: page.has_next,
        })
    }
}

/// Unknown status strings are treated as "no status filter", matching the
/// cursor's lenient-decode behavior.
fn parse_status(status: Option<&str>) -> Option<PaymentStatus> {
    status.and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_lenient() {
        assert_eq!(parse_status(Some("APPROVED")), Some(PaymentStatus::Approved));
        assert_eq!(parse_status(Some("REJECTED")), Some(PaymentStatus::Rejected));
        assert_eq!(parse_status(Some("INVALID_STATUS")), None);
        assert_eq!(parse_status(None), None);
    }

    #[test]
    fn test_default_filter_page_size() {
        assert_eq!(QueryFilter::default().limit, DEFAULT_PAGE_SIZE);
    }
}
