use solana_sdk::signature::read_keypair_file;
use tracing::{error, info, Level};

use lender_portal::{
    configuration::{get_configuration, AppState, State},
    error::Error,
    handler::{self, liquidations, offers, pool_balance, positions, wallet_balance},
    provider::WalletFeatures,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = get_configuration()?;
    let state = State::new(config)?;
    let app_state = AppState::new(state);

    info!(
        "lender portal starting on {} ({:?} mode)",
        app_state.config.network, app_state.config.execution_mode
    );

    match app_state.config.wallet_keypair_path.clone() {
        Some(path) => {
            let keypair = read_keypair_file(&path)
                .map_err(|e| Error::Wallet(format!("failed to read keypair {}: {}", path, e)))?;
            let label = app_state.config.wallet_label.clone();
            let address =
                handler::connect_wallet(&app_state, &label, keypair, WalletFeatures::full())
                    .await?;
            info!("lender wallet ready: {}", address);
        }
        None => {
            info!("no wallet keypair configured, feeds stay empty until one connects");
        }
    }

    let (_, _, _, _, _, _) = tokio::try_join!(
        offers::offers_task(app_state.clone()),
        positions::positions_task(app_state.clone()),
        liquidations::liquidations_task(app_state.clone()),
        pool_balance::pool_balance_task(app_state.clone()),
        wallet_balance::wallet_balance_task(app_state.clone()),
        server::server_task(&app_state),
    )?;

    Ok(())
}
