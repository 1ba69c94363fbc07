pub use self::feed::{Feed, FeedSnapshot};

pub mod feed;
pub mod liquidations;
pub mod offers;
pub mod pool_balance;
pub mod positions;
pub mod tokens;
pub mod wallet_balance;

use solana_sdk::signature::Keypair;
use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
    provider::WalletFeatures,
    types::{PoolBalance, WalletBalance},
};

/// Establishes the signing session, registers the wallet with the API
/// client's access pre-check, and pulls every feed in the foreground.
pub async fn connect_wallet(
    app_state: &AppState<State>,
    name: &str,
    keypair: Keypair,
    features: WalletFeatures,
) -> Result<String, Error> {
    let address = app_state.wallet.connect(name, keypair, features).await;
    app_state.api.set_wallet(&address).await;
    refresh_all(app_state, false).await;
    Ok(address)
}

/// Tears down the session and drops every feed to its empty value. The
/// API client's wallet context must go too, or a later pre-check would
/// run against a stale identity.
pub async fn disconnect_wallet(app_state: &AppState<State>) {
    app_state.wallet.disconnect().await;
    app_state.api.clear_wallet().await;

    app_state.offers.reset(Vec::new()).await;
    app_state.positions.reset(Vec::new()).await;
    app_state.liquidations.reset(Vec::new()).await;
    app_state.pool_balance.reset(PoolBalance::default()).await;
    app_state.wallet_balance.reset(WalletBalance::default()).await;
}

/// One fetch per feed, concurrently. Feeds own disjoint state, so the
/// interleaving is free.
pub async fn refresh_all(app_state: &AppState<State>, background: bool) {
    let (offers, positions, liquidations, pool, wallet) = tokio::join!(
        offers::refresh(app_state, background),
        positions::refresh(app_state, background),
        liquidations::refresh(app_state, background),
        pool_balance::refresh(app_state, background),
        wallet_balance::refresh(app_state, background),
    );

    for result in [offers, positions, liquidations, pool, wallet] {
        if let Err(e) = result {
            error!("refresh error {}", e);
        }
    }
}
