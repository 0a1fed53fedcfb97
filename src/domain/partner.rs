use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A merchant enrolled with the gateway. Read-only from the core's
/// perspective; only `active` gates processing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Partner {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub active: bool,
}

impl Partner {
    pub fn new(id: i64, code: impl Into<String>, name: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            active,
        }
    }
}

/// A fee schedule row. Several rows may exist per partner; the applicable
/// one at any instant is selected by [`FeePolicy::select_effective`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FeePolicy {
    pub id: i64,
    pub partner_id: i64,
    pub effective_from: DateTime<Utc>,
    /// Fractional rate, e.g. 0.0235 for 2.35%.
    pub percentage: Decimal,
    pub fixed_fee: Option<Decimal>,
}

impl FeePolicy {
    /// Picks the policy with the greatest `effective_from` not after `at`.
    ///
    /// Ties on identical `effective_from` are broken by the highest `id`,
    /// so selection stays deterministic even on duplicated schedules.
    pub fn select_effective(policies: &[FeePolicy], partner_id: i64, at: DateTime<Utc>) -> Option<&FeePolicy> {
        policies
            .iter()
            .filter(|p| p.partner_id == partner_id && p.effective_from <= at)
            .max_by_key(|p| (p.effective_from, p.id))
    }
}
