use tokio::{time, time::Duration};
use tracing::{error, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{decode_transaction, to_base_units, token_decimals},
    provider::ERR_NOT_CONNECTED,
    types::{PoolActionParams, PoolActionRequest, PoolBalance},
};

pub async fn refresh(app_state: &AppState<State>, background: bool) -> Result<(), Error> {
    let Some(wallet) = app_state.wallet.pubkey().await else {
        app_state.pool_balance.reset(PoolBalance::default()).await;
        return Ok(());
    };

    let quote_token = app_state.selected_quote.read().await.clone();
    let generation = app_state.pool_balance.begin(background).await;
    let result = app_state
        .api
        .pool_balance(&wallet.to_string(), &quote_token)
        .await;
    app_state
        .pool_balance
        .resolve(generation, result, PoolBalance::default(), &app_state.notifier)
        .await;

    Ok(())
}

pub async fn pool_balance_task(app_state: AppState<State>) -> Result<(), Error> {
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
                error!("pool balance task error {}", e);
            }
        }
    })
    .await?
}

/// Quote-token selector change: the pool snapshot is per token, so a
/// new selection forces a foreground refetch.
pub async fn select_quote(app_state: &AppState<State>, quote_token: String) -> Result<(), Error> {
    *app_state.selected_quote.write().await = quote_token;
    refresh(app_state, false).await
}

pub async fn deposit(
    app_state: &AppState<State>,
    params: PoolActionParams,
) -> Result<String, Error> {
    let result = submit(app_state, params, false).await;
    if let Err(e) = &result {
        app_state.notifier.route_error(e).await;
    }
    result
}

pub async fn withdraw(
    app_state: &AppState<State>,
    params: PoolActionParams,
) -> Result<String, Error> {
    let result = submit(app_state, params, true).await;
    if let Err(e) = &result {
        app_state.notifier.route_error(e).await;
    }
    result
}

async fn submit(
    app_state: &AppState<State>,
    params: PoolActionParams,
    withdraw: bool,
) -> Result<String, Error> {
    let wallet = app_state
        .wallet
        .pubkey()
        .await
        .map(|key| key.to_string())
        .ok_or_else(|| Error::Wallet(ERR_NOT_CONNECTED.to_owned()))?;

    let decimals = token_decimals(&params.quote_token);
    let request = PoolActionRequest {
        user_wallet: wallet,
        base_amount: to_base_units(params.amount, decimals)?,
        quote_token: params.quote_token,
    };

    let envelope = if withdraw {
        app_state.api.withdraw(&request).await?
    } else {
        app_state.api.deposit(&request).await?
    };

    // pool actions sign locally and submit through the RPC directly
    let tx = decode_transaction(&envelope.transaction)?;
    let signed = app_state.wallet.sign_transaction(&tx).await?;
    let signature = app_state.rpc.send_transaction(&signed).await?;

    let action = if withdraw { "withdraw" } else { "deposit" };
    info!(
        "{} of {} {} submitted: {}",
        action, params.amount, request.quote_token, signature
    );

    refresh(app_state, false).await?;
    Ok(signature)
}
