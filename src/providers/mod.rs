pub mod crypto;
pub mod encrypted;
pub mod mock;
pub mod token;

pub use encrypted::{EncryptedProvider, EncryptedProviderConfig};
pub use mock::MockProvider;
pub use token::TokenProvider;

use crate::domain::ports::{ProviderAdapter, ProviderAdapterBox};

/// Ordered collection of provider adapters.
///
/// Dispatch is deterministic first-match: adapters are probed in
/// registration order and the earliest one claiming support for a partner
/// always wins. Overlapping `supports` claims are therefore not an error,
/// but registration order is significant and must be kept stable.
pub struct ProviderRegistry {
    adapters: Vec<ProviderAdapterBox>,
}

impl ProviderRegistry {
    pub fn new(adapters: Vec<ProviderAdapterBox>) -> Self {
        Self { adapters }
    }

    /// The first registered adapter that supports `partner_id`, if any.
    pub fn select(&self, partner_id: i64) -> Option<&dyn ProviderAdapter> {
        self.adapters
            .iter()
            .find(|a| a.supports(partner_id))
            .map(|a| a.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
