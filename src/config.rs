use crate::error::{PaymentError, Result};

/// Connection settings for the encrypted gateway, injected from the
/// environment. The IV is fixed per deployment and supplied base64url
/// encoded; the API key doubles as the key-derivation secret.
#[derive(Debug, Clone)]
pub struct EncryptedProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub iv: String,
    pub timeout_secs: u64,
}

impl EncryptedProviderConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PG_BASE_URL")
            .map_err(|_| PaymentError::Internal("PG_BASE_URL is required".into()))?;
        let api_key = std::env::var("PG_API_KEY")
            .map_err(|_| PaymentError::Internal("PG_API_KEY is required".into()))?;
        let iv = std::env::var("PG_IV")
            .map_err(|_| PaymentError::Internal("PG_IV is required".into()))?;
        let timeout_secs = std::env::var("PG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            api_key,
            iv,
            timeout_secs,
        })
    }
}
