use crate::domain::card::{CardData, EncryptedCard};
use crate::domain::ports::{ApprovalRequest, ApprovalResult, ProviderAdapter};
use crate::error::{ProviderError, Result};
use crate::providers::crypto::{self, PayloadCipherBox, IV_LEN, KEY_LEN};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

pub use crate::config::EncryptedProviderConfig;

const APPROVE_PATH: &str = "/api/v1/pay/credit-card";

/// Plaintext request body, serialized to JSON and encrypted before it
/// leaves this module. Never logged.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlainPayload<'a> {
    card_number: &'a str,
    birth_date: &'a str,
    expiry: &'a str,
    password: &'a str,
    amount: i64,
}

#[derive(Serialize)]
struct EncryptedBody {
    enc: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApproveResponse {
    approval_code: String,
    approved_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectionResponse {
    error_code: String,
    message: String,
    #[serde(default)]
    reference_id: Option<String>,
}

/// Gateway client that protects the request body with AES-256-GCM.
///
/// The key is derived by hashing the shared API key; the IV is fixed and
/// supplied by configuration. Transport status codes map onto the three
/// provider error kinds: 401 is an authentication failure, 422 a business
/// rejection with a decoded error body, anything 5xx (and transport
/// failures) a gateway outage. Card number, birth date and password never
/// appear in logs or error messages.
pub struct EncryptedProvider {
    partner_id: i64,
    config: EncryptedProviderConfig,
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
    cipher: PayloadCipherBox,
    client: Client,
}

impl EncryptedProvider {
    pub fn new(
        partner_id: i64,
        config: EncryptedProviderConfig,
        cipher: PayloadCipherBox,
    ) -> Result<Self> {
        let key = crypto::derive_key(&config.api_key);
        let iv = crypto::decode_iv(&config.iv)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| crate::error::PaymentError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            partner_id,
            config,
            key,
            iv,
            cipher,
            client,
        })
    }

    fn encrypt_payload(
        &self,
        card: &EncryptedCard,
        amount: Decimal,
    ) -> std::result::Result<String, ProviderError> {
        let plaintext = build_payload(card, amount)?;
        self.cipher
            .encrypt(&plaintext, &self.key, &self.iv)
            .map_err(|e| ProviderError::ServerUnavailable(format!("payload encryption: {e}")))
    }
}

#[async_trait]
impl ProviderAdapter for EncryptedProvider {
    fn supports(&self, partner_id: i64) -> bool {
        partner_id == self.partner_id
    }

    async fn approve(
        &self,
        request: &ApprovalRequest,
    ) -> std::result::Result<ApprovalResult, ProviderError> {
        info!(partner_id = request.partner_id, %request.amount, "encrypted gateway request");

        let CardData::Encrypted(card) = &request.card_data else {
            return Err(ProviderError::Rejected {
                error_code: "UNSUPPORTED_CARD_DATA".into(),
                message: "encrypted gateway requires encrypted card data".into(),
                reference_id: None,
            });
        };

        let enc = self.encrypt_payload(card, request.amount)?;
        let url = format!("{}{}", self.config.base_url, APPROVE_PATH);
        let response = self
            .client
            .post(&url)
            .header("API-KEY", &self.config.api_key)
            .json(&EncryptedBody { enc })
            .send()
            .await
            .map_err(|e| ProviderError::ServerUnavailable(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status, &body));
        }

        let body: ApproveResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ServerUnavailable(format!("malformed response: {e}")))?;
        info!(approval_code = %body.approval_code, "encrypted gateway approval");

        let approved_at = parse_approved_at(&body.approved_at)?;
        let (card_bin, card_last4) = derive_card_fields(&card.card_number);
        Ok(ApprovalResult {
            approval_code: body.approval_code,
            approved_at,
            card_bin,
            card_last4,
        })
    }
}

/// Serializes the plaintext payload. The gateway takes whole currency
/// units; fractional remainders are truncated the same way upstream does.
fn build_payload(
    card: &EncryptedCard,
    amount: Decimal,
) -> std::result::Result<String, ProviderError> {
    let amount = amount
        .trunc()
        .to_i64()
        .ok_or_else(|| ProviderError::ServerUnavailable("amount out of range".into()))?;
    let payload = PlainPayload {
        card_number: &card.card_number,
        birth_date: &card.birth_date,
        expiry: &card.expiry,
        password: &card.password,
        amount,
    };
    serde_json::to_string(&payload)
        .map_err(|e| ProviderError::ServerUnavailable(format!("payload encoding: {e}")))
}

/// Maps a non-2xx gateway response to a provider error kind.
fn map_error_response(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("encrypted gateway authentication failed");
            ProviderError::AuthenticationFailed("API-KEY authentication failed".into())
        }
        StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<RejectionResponse>(body) {
            Ok(rejection) => {
                warn!(error_code = %rejection.error_code, "encrypted gateway rejected payment");
                ProviderError::Rejected {
                    error_code: rejection.error_code,
                    message: rejection.message,
                    reference_id: rejection.reference_id,
                }
            }
            Err(e) => ProviderError::ServerUnavailable(format!("malformed rejection body: {e}")),
        },
        s if s.is_server_error() => {
            error!(status = %s, "encrypted gateway server error");
            ProviderError::ServerUnavailable(format!("PG server error: {s}"))
        }
        s => {
            error!(status = %s, "encrypted gateway unexpected status");
            ProviderError::ServerUnavailable(format!("unexpected status: {s}"))
        }
    }
}

/// The gateway reports local date-times without an offset, e.g.
/// `2024-01-01T12:00:00`; treated as UTC.
fn parse_approved_at(raw: &str) -> std::result::Result<chrono::DateTime<chrono::Utc>, ProviderError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|e| ProviderError::ServerUnavailable(format!("malformed approval time: {e}")))
}

/// Card BIN (first six digits) and last four, for reporting; lenient on
/// short inputs like the upstream implementation.
fn derive_card_fields(card_number: &str) -> (Option<String>, Option<String>) {
    let cleaned: String = card_number.chars().filter(|c| *c != '-').collect();
    let bin = cleaned.chars().take(6).collect::<String>();
    let last4 = cleaned
        .chars()
        .skip(cleaned.len().saturating_sub(4))
        .collect::<String>();
    (Some(bin), Some(last4))
}
