use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TokenRef;

/// Loan offer owned by a lender. Created and updated through signed
/// transactions; never deleted client-side, "paused" arrives as
/// `active: false` / `target_ltv: 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub public_key: String,
    pub lender_wallet: String,
    pub collateral_token: TokenRef,
    pub quote_token: TokenRef,
    pub apr: f64,
    pub max_exposure: f64,
    pub current_exposure: f64,
    pub available_for_open: f64,
    pub active: bool,
    pub target_ltv: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
