use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::portfolio_summary,
    configuration::{AppState, State},
    error::Error,
    handler::{pool_balance, tokens},
    types::{PortfolioSummary, TokenInfo, WalletBalance},
};

#[derive(Debug, Deserialize)]
pub struct Query {
    quote: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub wallet: Option<String>,
    pub wallet_name: Option<String>,
    pub quote_token: String,
    pub token: Option<TokenInfo>,
    pub price: Option<f64>,
    pub summary: PortfolioSummary,
    pub wallet_balance: WalletBalance,
    pub loading: bool,
    pub error: Option<String>,
}

#[get("/portfolio")]
async fn index(
    state: web::Data<AppState<State>>,
    query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let quote_token = match &query.quote {
        Some(quote) => quote.clone(),
        None => state.selected_quote.read().await.clone(),
    };

    let balance = state.pool_balance.snapshot().await;
    let offers = state.offers.data().await;
    let positions = state.positions.data().await;
    let liquidations = state.liquidations.data().await;

    let summary = portfolio_summary(
        &balance.data,
        &offers,
        &positions,
        &liquidations,
        &quote_token,
    )?;

    // display context only; a miss here must not fail the summary
    let (token, price) = futures::join!(
        tokens::token_metadata(&state, &quote_token),
        tokens::token_price(&state, &quote_token),
    );

    Ok(HttpResponse::Ok().json(Response {
        wallet: state.wallet.pubkey().await.map(|key| key.to_string()),
        wallet_name: state.wallet.wallet_name().await,
        quote_token,
        token: token.ok(),
        price: price.ok().map(|p| p.price),
        summary,
        wallet_balance: state.wallet_balance.data().await,
        loading: balance.loading,
        error: balance.error,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    pub quote_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_token: String,
}

#[post("/quote")]
async fn select(
    state: web::Data<AppState<State>>,
    body: web::Json<QuoteBody>,
) -> Result<HttpResponse, Error> {
    let quote_token = body.into_inner().quote_token;
    pool_balance::select_quote(&state, quote_token.clone()).await?;

    Ok(HttpResponse::Ok().json(QuoteResponse { quote_token }))
}
