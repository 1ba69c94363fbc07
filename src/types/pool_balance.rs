use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Per (wallet, quote token) pool snapshot as the API reports it.
/// Transient: never persisted, always re-derived with liquidation and
/// interest data layered on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolBalance {
    pub total: f64,
    pub available: f64,
    pub deployed: f64,
}

/// Pool snapshot combined with the derived liquidation and interest
/// amounts for the selected quote token.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: BigDecimal,
    pub available: BigDecimal,
    pub deployed: BigDecimal,
    pub liquidated: BigDecimal,
    pub pending_interest: BigDecimal,
}
