use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response shape of every mutating lender endpoint: base58 transaction
/// bytes plus an optional pass-through swap quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    pub transaction: String,
    #[serde(default)]
    pub quote_response: Option<Value>,
}
