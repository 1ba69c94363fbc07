use tokio::{time, time::Duration};
use tracing::{error, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::decode_transaction,
    provider::ERR_NOT_CONNECTED,
    types::{
        ChangeLtvParams, ChangeLtvRequest, CreateOfferParams, CreateOfferRequest,
        UpdateOfferParams, UpdateOfferRequest,
    },
};

pub async fn refresh(app_state: &AppState<State>, background: bool) -> Result<(), Error> {
    let Some(wallet) = app_state.wallet.pubkey().await else {
        app_state.offers.reset(Vec::new()).await;
        return Ok(());
    };

    let generation = app_state.offers.begin(background).await;
    let result = app_state.api.lender_offers(&wallet.to_string()).await;
    app_state
        .offers
        .resolve(generation, result, Vec::new(), &app_state.notifier)
        .await;

    Ok(())
}

pub async fn offers_task(app_state: AppState<State>) -> Result<(), Error> {
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
                error!("offers task error {}", e);
            }
        }
    })
    .await?
}

pub async fn create_offer(
    app_state: &AppState<State>,
    params: CreateOfferParams,
) -> Result<String, Error> {
    let result = submit_create(app_state, params).await;
    if let Err(e) = &result {
        app_state.notifier.route_error(e).await;
    }
    result
}

pub async fn update_offer(
    app_state: &AppState<State>,
    params: UpdateOfferParams,
) -> Result<String, Error> {
    let result = submit_update(app_state, params).await;
    if let Err(e) = &result {
        app_state.notifier.route_error(e).await;
    }
    result
}

pub async fn change_ltv(
    app_state: &AppState<State>,
    params: ChangeLtvParams,
) -> Result<String, Error> {
    let result = submit_change_ltv(app_state, params).await;
    if let Err(e) = &result {
        app_state.notifier.route_error(e).await;
    }
    result
}

async fn submit_create(
    app_state: &AppState<State>,
    params: CreateOfferParams,
) -> Result<String, Error> {
    let wallet = require_wallet(app_state).await?;
    let request = CreateOfferRequest {
        user_wallet: wallet,
        collateral_token: params.collateral_token,
        quote_token: params.quote_token,
        apr: params.apr,
        exposure: params.exposure,
        target_ltv: params.target_ltv,
    };

    let envelope = app_state.api.create_offer(&request).await?;
    let tx = decode_transaction(&envelope.transaction)?;
    let signature = app_state.wallet.sign_and_send(&tx, &app_state.rpc).await?;
    info!("offer created by {}: {}", request.user_wallet, signature);

    refresh(app_state, false).await?;
    Ok(signature)
}

async fn submit_update(
    app_state: &AppState<State>,
    params: UpdateOfferParams,
) -> Result<String, Error> {
    let wallet = require_wallet(app_state).await?;
    let request = UpdateOfferRequest {
        user_wallet: wallet,
        offer: params.offer,
        apr: params.apr,
        max_exposure: params.max_exposure,
    };

    let envelope = app_state.api.update_offer(&request).await?;
    let tx = decode_transaction(&envelope.transaction)?;
    let signature = app_state.wallet.sign_and_send(&tx, &app_state.rpc).await?;
    info!("offer {} updated: {}", request.offer, signature);

    refresh(app_state, false).await?;
    Ok(signature)
}

async fn submit_change_ltv(
    app_state: &AppState<State>,
    params: ChangeLtvParams,
) -> Result<String, Error> {
    let wallet = require_wallet(app_state).await?;
    let request = ChangeLtvRequest {
        user_wallet: wallet,
        offer: params.offer,
        target_ltv: params.target_ltv,
    };

    let envelope = app_state.api.change_ltv(&request).await?;
    let tx = decode_transaction(&envelope.transaction)?;
    let signature = app_state.wallet.sign_and_send(&tx, &app_state.rpc).await?;
    info!("offer {} LTV changed: {}", request.offer, signature);

    refresh(app_state, false).await?;
    Ok(signature)
}

async fn require_wallet(app_state: &AppState<State>) -> Result<String, Error> {
    app_state
        .wallet
        .pubkey()
        .await
        .map(|key| key.to_string())
        .ok_or_else(|| Error::Wallet(ERR_NOT_CONNECTED.to_owned()))
}
