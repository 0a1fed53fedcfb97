use serde::Deserialize;
use std::fmt;

/// Card credentials for the encrypted gateway. Holds the raw card number,
/// birth date, expiry and password: never logged, never persisted, and the
/// `Debug` output is redacted. Intentionally not `Serialize` — the only
/// serialized form is the encrypted provider payload.
#[derive(Deserialize, PartialEq, Clone)]
pub struct EncryptedCard {
    pub card_number: String,
    /// YYYYMMDD
    pub birth_date: String,
    /// MMYY
    pub expiry: String,
    pub password: String,
}

impl fmt::Debug for EncryptedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedCard(****)")
    }
}

/// Per-provider card data. Each partner id is statically bound to exactly
/// one variant; a mismatch is a validation error, not a provider error.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardData {
    /// Offline mock gateway: the card is already reduced to BIN + last 4.
    Mock {
        card_bin: String,
        card_last4: String,
        product_name: Option<String>,
    },
    /// Encrypted gateway: full credentials, transmitted encrypted only.
    Encrypted(EncryptedCard),
    /// Tokenized gateway: no raw card data crosses this system.
    Token {
        encrypted_card_token: String,
        merchant_id: String,
        order_id: String,
    },
}

impl CardData {
    pub fn kind(&self) -> CardKind {
        match self {
            CardData::Mock { .. } => CardKind::Mock,
            CardData::Encrypted(_) => CardKind::Encrypted,
            CardData::Token { .. } => CardKind::Token,
        }
    }
}

/// Discriminant of [`CardData`], used in schema-mismatch errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardKind {
    Mock,
    Encrypted,
    Token,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Mock => "MockCardData",
            CardKind::Encrypted => "EncryptedCardData",
            CardKind::Token => "TokenCardData",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypted_card() -> EncryptedCard {
        EncryptedCard {
            card_number: "1111-2222-3333-4444".into(),
            birth_date: "19900101".into(),
            expiry: "1227".into(),
            password: "12".into(),
        }
    }

    #[test]
    fn test_debug_output_redacts_sensitive_fields() {
        let card = CardData::Encrypted(encrypted_card());
        let rendered = format!("{:?}", card);
        assert!(rendered.contains("****"));
        assert!(!rendered.contains("1111"));
        assert!(!rendered.contains("19900101"));
        assert!(!rendered.contains("12"));
    }

    #[test]
    fn test_kind_discriminants() {
        let mock = CardData::Mock {
            card_bin: "123456".into(),
            card_last4: "4242".into(),
            product_name: None,
        };
        let token = CardData::Token {
            encrypted_card_token: "enc_token_xxx".into(),
            merchant_id: "M001".into(),
            order_id: "ORD-001".into(),
        };
        assert_eq!(mock.kind(), CardKind::Mock);
        assert_eq!(CardData::Encrypted(encrypted_card()).kind(), CardKind::Encrypted);
        assert_eq!(token.kind(), CardKind::Token);
    }

    #[test]
    fn test_deserializes_tagged_variants() {
        let json = r#"{"type":"MOCK","card_bin":"123456","card_last4":"4242","product_name":null}"#;
        let card: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(card.kind(), CardKind::Mock);

        let json = r#"{"type":"TOKEN","encrypted_card_token":"t","merchant_id":"M001","order_id":"O1"}"#;
        let card: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(card.kind(), CardKind::Token);
    }
}
