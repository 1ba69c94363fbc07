use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{claim_status, ClaimStatus},
    configuration::{AppState, State},
    error::Error,
    types::Liquidation,
};

#[derive(Debug, Deserialize)]
pub struct Query {
    quote: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidationView {
    #[serde(flatten)]
    pub liquidation: Liquidation,
    pub claim: ClaimStatus,
}

#[get("/liquidations")]
async fn index(
    state: web::Data<AppState<State>>,
    query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let snapshot = state.liquidations.snapshot().await;
    let now = Utc::now();

    let views: Vec<LiquidationView> = snapshot
        .data
        .into_iter()
        .filter(|liquidation| match &query.quote {
            Some(quote) => &liquidation.to_receive_token == quote,
            None => true,
        })
        .map(|liquidation| LiquidationView {
            claim: claim_status(&liquidation, now),
            liquidation,
        })
        .collect();

    Ok(HttpResponse::Ok().json(views))
}
