use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TokenRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionStatus {
    Active,
    Repaid,
    Liquidated,
    Sold,
    SoldByTakeProfit,
}

impl PositionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PositionStatus::Active)
    }
}

/// Borrower position opened against a lender offer. Read-only for the
/// client; the status moves exactly once to a terminal state server-side.
/// `interest_accrued` is only meaningful while the status is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub address: String,
    pub status: PositionStatus,
    pub collateral_token: TokenRef,
    pub quote_token: TokenRef,
    pub initial_borrow_quantity: f64,
    pub interest_accrued: f64,
    pub current_ltv: f64,
    pub current_price: f64,
    pub liquidation_price: f64,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    pub offer: String,
    pub trader: String,
}
