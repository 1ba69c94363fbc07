use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Token descriptor as the lender API sends it: either a full token
/// object or a bare mint address string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenRef {
    Token(TokenInfo),
    Address(String),
}

impl TokenRef {
    pub fn address(&self) -> &str {
        match self {
            TokenRef::Token(info) => &info.address,
            TokenRef::Address(address) => address,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            TokenRef::Token(info) => Some(&info.symbol),
            TokenRef::Address(_) => None,
        }
    }

    /// Matches a target given as either a mint address or a symbol.
    pub fn matches(&self, target: &str) -> bool {
        if self.address() == target {
            return true;
        }
        match self.symbol() {
            Some(symbol) => symbol.eq_ignore_ascii_case(target),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    pub address: String,
    pub price: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ref_deserializes_both_shapes() {
        let from_object: TokenRef = serde_json::from_str(
            r#"{"address":"So11111111111111111111111111111111111111112","symbol":"SOL"}"#,
        )
        .unwrap();
        let from_string: TokenRef =
            serde_json::from_str(r#""So11111111111111111111111111111111111111112""#).unwrap();

        assert_eq!(from_object.address(), from_string.address());
        assert!(from_object.matches("sol"));
        assert!(from_string.matches("So11111111111111111111111111111111111111112"));
        assert!(!from_string.matches("SOL"));
    }
}
