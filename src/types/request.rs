use serde::{Deserialize, Serialize};

// Controller-facing parameter objects. The connected wallet address is
// attached by the handler, not supplied by the caller.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferParams {
    pub collateral_token: String,
    pub quote_token: String,
    pub apr: f64,
    pub exposure: f64,
    pub target_ltv: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferParams {
    pub offer: String,
    pub apr: f64,
    pub max_exposure: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLtvParams {
    pub offer: String,
    pub target_ltv: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolActionParams {
    pub quote_token: String,
    pub amount: f64,
}

// Wire payloads for the lender API, wallet address included.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub user_wallet: String,
    pub collateral_token: String,
    pub quote_token: String,
    pub apr: f64,
    pub exposure: f64,
    pub target_ltv: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    pub user_wallet: String,
    pub offer: String,
    pub apr: f64,
    pub max_exposure: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLtvRequest {
    pub user_wallet: String,
    pub offer: String,
    pub target_ltv: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolActionRequest {
    pub user_wallet: String,
    pub quote_token: String,
    /// Integer on-chain base units, converted from the user-facing
    /// decimal amount before submission.
    pub base_amount: u64,
}
