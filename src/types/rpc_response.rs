use serde::Deserialize;

// Solana JSON-RPC envelopes for the direct chain reads.

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct RpcBody<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RpcContextValue<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
pub struct RpcTokenAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(rename = "uiAmount", default)]
    pub ui_amount: Option<f64>,
    #[serde(rename = "uiAmountString", default)]
    pub ui_amount_string: Option<String>,
}
