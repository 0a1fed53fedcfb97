use crate::error::{PaymentError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// AES-256-GCM key length.
pub const KEY_LEN: usize = 32;
/// GCM nonce length.
pub const IV_LEN: usize = 12;

/// Transport-payload encryption capability.
///
/// The AEAD primitive itself is injected by the deployment; the core only
/// depends on this interface. Implementations receive the derived 32-byte
/// key and the configured 12-byte IV and return
/// `base64url_no_padding(ciphertext || tag)`.
pub trait PayloadCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str, key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Result<String>;
}

pub type PayloadCipherBox = Box<dyn PayloadCipher>;

/// Derives the 32-byte encryption key as SHA-256 of the shared API key.
pub fn derive_key(api_key: &str) -> [u8; KEY_LEN] {
    let digest = Sha256::digest(api_key.as_bytes());
    digest.into()
}

/// Decodes the base64url-encoded IV from configuration; must be 12 bytes.
pub fn decode_iv(iv_base64url: &str) -> Result<[u8; IV_LEN]> {
    let bytes = URL_SAFE_NO_PAD
        .decode(iv_base64url.trim_end_matches('='))
        .map_err(|e| PaymentError::Internal(format!("invalid IV encoding: {e}")))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| PaymentError::Internal(format!("IV must be {IV_LEN} bytes, got {}", bytes.len())))
}
