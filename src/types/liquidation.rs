use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liquidation record for a position. `sold_for` is kept as the raw
/// base-unit string the API sends, denominated in `to_receive_token`.
/// A missing `send_tx` means the proceeds are still in cooldown or
/// processing; once populated the transfer to the lender is settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liquidation {
    pub offer: String,
    pub position: String,
    pub borrowed_amount: f64,
    pub sold_for: String,
    pub token_sold: String,
    pub to_receive_token: String,
    pub liquidated_at: DateTime<Utc>,
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
    pub liquidation_tx: String,
    #[serde(default)]
    pub sale_tx: Option<String>,
    #[serde(default)]
    pub send_tx: Option<String>,
    #[serde(default)]
    pub send_timestamp: Option<DateTime<Utc>>,
}
