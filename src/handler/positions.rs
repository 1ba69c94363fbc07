use tokio::{time, time::Duration};
use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
};

pub async fn refresh(app_state: &AppState<State>, background: bool) -> Result<(), Error> {
    let Some(wallet) = app_state.wallet.pubkey().await else {
        app_state.positions.reset(Vec::new()).await;
        return Ok(());
    };

    let generation = app_state.positions.begin(background).await;
    let result = app_state.api.lender_positions(&wallet.to_string()).await;
    app_state
        .positions
        .resolve(generation, result, Vec::new(), &app_state.notifier)
        .await;

    Ok(())
}

pub async fn positions_task(app_state: AppState<State>) -> Result<(), Error> {
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
                error!("positions task error {}", e);
            }
        }
    })
    .await?
}
