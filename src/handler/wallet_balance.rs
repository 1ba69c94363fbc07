use tokio::{time, time::Duration};
use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{LAMPORTS_PER_SOL, USDC_MINT},
    provider::ApiError,
    types::WalletBalance,
};

pub async fn refresh(app_state: &AppState<State>, background: bool) -> Result<(), Error> {
    let Some(wallet) = app_state.wallet.pubkey().await else {
        app_state.wallet_balance.reset(WalletBalance::default()).await;
        return Ok(());
    };

    let generation = app_state.wallet_balance.begin(background).await;
    let result = fetch(app_state, &wallet.to_string())
        .await
        .map_err(|e| ApiError::classify(e.to_string()));
    app_state
        .wallet_balance
        .resolve(generation, result, WalletBalance::default(), &app_state.notifier)
        .await;

    Ok(())
}

async fn fetch(app_state: &AppState<State>, address: &str) -> Result<WalletBalance, Error> {
    let lamports = app_state.rpc.get_balance(address).await?;
    let usdc = app_state.rpc.get_token_balance(address, USDC_MINT).await?;

    Ok(WalletBalance {
        sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        usdc,
    })
}

pub async fn wallet_balance_task(app_state: AppState<State>) -> Result<(), Error> {
    if !app_state.config.enable_polling {
        return Ok(());
    }

    let mut interval =
        time::interval(Duration::from_millis(app_state.config.poll_interval_ms));

    tokio::spawn(async move {
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = refresh(&app_state, true).await {
                error!("wallet balance task error {}", e);
            }
        }
    })
    .await?
}
