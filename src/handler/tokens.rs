use crate::{
    cache::cached_fetch,
    configuration::{AppState, State},
    error::Error,
    types::{TokenInfo, TokenPrice},
};

pub async fn token_metadata(
    app_state: &AppState<State>,
    address: &str,
) -> Result<TokenInfo, Error> {
    cached_fetch(&app_state.token_metadata, address, || async {
        Ok(app_state.api.token_metadata(address).await?)
    })
    .await
}

pub async fn token_price(app_state: &AppState<State>, address: &str) -> Result<TokenPrice, Error> {
    cached_fetch(&app_state.token_prices, address, || async {
        Ok(app_state.api.token_price(address).await?)
    })
    .await
}
