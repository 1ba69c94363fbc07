use serde::{Deserialize, Serialize};

/// Native and stable balances read straight from the chain for the
/// connected wallet. Display context only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub sol: f64,
    pub usdc: f64,
}
