use crate::domain::card::CardKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Failure modes of the payment core.
///
/// The first five variants are detected before any external call and never
/// result in a persisted payment. `Rejected` leaves exactly one REJECTED
/// record behind before propagating. `AuthenticationFailed` and
/// `ServerUnavailable` propagate without persistence: the first indicates
/// static gateway misconfiguration (never retry, alert ops), the second a
/// transport-level outage (caller may retry).
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Partner not found: {0}")]
    PartnerNotFound(i64),
    #[error("Partner is inactive: {0}")]
    PartnerInactive(i64),
    #[error("No fee policy found for partner: {0}")]
    FeePolicyMissing(i64),
    #[error("No provider for partner: {0}")]
    ProviderNotFound(i64),
    #[error("Invalid card data for partner {partner_id}: expected {expected}, got {actual}")]
    InvalidCardData {
        partner_id: i64,
        expected: CardKind,
        actual: CardKind,
    },
    #[error("Payment rejected by provider: {error_code}: {message}")]
    Rejected {
        error_code: String,
        message: String,
        reference_id: Option<String>,
    },
    #[error("Provider authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Provider unavailable: {0}")]
    ServerUnavailable(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Stable machine-readable code for the boundary layer. `Rejected`
    /// surfaces the provider's own error code unchanged.
    pub fn error_code(&self) -> &str {
        match self {
            PaymentError::PartnerNotFound(_) => "PARTNER_NOT_FOUND",
            PaymentError::PartnerInactive(_) => "PARTNER_INACTIVE",
            PaymentError::FeePolicyMissing(_) => "FEE_POLICY_NOT_FOUND",
            PaymentError::ProviderNotFound(_) => "PG_CLIENT_NOT_FOUND",
            PaymentError::InvalidCardData { .. } => "INVALID_PG_CARD_DATA",
            PaymentError::Rejected { error_code, .. } => error_code,
            PaymentError::AuthenticationFailed(_) => "PG_AUTH_FAILED",
            PaymentError::ServerUnavailable(_) => "PG_SERVER_ERROR",
            PaymentError::ValidationFailed(_) => "VALIDATION_FAILED",
            PaymentError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Conventional HTTP status the surrounding transport must honor.
    pub fn http_status(&self) -> u16 {
        match self {
            PaymentError::PartnerNotFound(_) => 404,
            PaymentError::PartnerInactive(_)
            | PaymentError::ProviderNotFound(_)
            | PaymentError::InvalidCardData { .. }
            | PaymentError::ValidationFailed(_) => 400,
            PaymentError::Rejected { .. } => 422,
            PaymentError::ServerUnavailable(_) => 502,
            PaymentError::FeePolicyMissing(_)
            | PaymentError::AuthenticationFailed(_)
            | PaymentError::Internal(_) => 500,
        }
    }
}

/// Outcome classes a provider adapter can signal besides success.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Business rejection (e.g. INSUFFICIENT_LIMIT, stolen card). The
    /// orchestrator records it before re-signaling.
    #[error("rejected: {error_code}: {message}")]
    Rejected {
        error_code: String,
        message: String,
        reference_id: Option<String>,
    },
    /// Credential misconfiguration (missing/unknown API key). Fatal.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    /// Gateway outage or transport failure. Retryable by the caller.
    #[error("server unavailable: {0}")]
    ServerUnavailable(String),
}

impl From<ProviderError> for PaymentError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Rejected {
                error_code,
                message,
                reference_id,
            } => PaymentError::Rejected {
                error_code,
                message,
                reference_id,
            },
            ProviderError::AuthenticationFailed(msg) => PaymentError::AuthenticationFailed(msg),
            ProviderError::ServerUnavailable(msg) => PaymentError::ServerUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_to_http_status_mapping() {
        assert_eq!(PaymentError::PartnerNotFound(9).http_status(), 404);
        assert_eq!(PaymentError::PartnerInactive(1).http_status(), 400);
        assert_eq!(PaymentError::FeePolicyMissing(1).http_status(), 500);
        assert_eq!(PaymentError::ProviderNotFound(1).http_status(), 400);
        assert_eq!(
            PaymentError::InvalidCardData {
                partner_id: 1,
                expected: CardKind::Mock,
                actual: CardKind::Token,
            }
            .http_status(),
            400
        );
        assert_eq!(
            PaymentError::Rejected {
                error_code: "INSUFFICIENT_LIMIT".into(),
                message: "limit exceeded".into(),
                reference_id: None,
            }
            .http_status(),
            422
        );
        assert_eq!(
            PaymentError::AuthenticationFailed("bad key".into()).http_status(),
            500
        );
        assert_eq!(
            PaymentError::ServerUnavailable("down".into()).http_status(),
            502
        );
        assert_eq!(
            PaymentError::ValidationFailed("amount".into()).http_status(),
            400
        );
    }

    #[test]
    fn test_rejected_surfaces_provider_code() {
        let err = PaymentError::Rejected {
            error_code: "STOLEN_CARD".into(),
            message: "card reported stolen".into(),
            reference_id: Some("ref-1".into()),
        };
        assert_eq!(err.error_code(), "STOLEN_CARD");
    }

    #[test]
    fn test_provider_error_conversion() {
        let err: PaymentError = ProviderError::ServerUnavailable("503".into()).into();
        assert!(matches!(err, PaymentError::ServerUnavailable(_)));
    }
}
