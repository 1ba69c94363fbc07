use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{position_risk, RiskLevel},
    configuration::{AppState, State},
    error::Error,
    types::Position,
};

#[derive(Debug, Deserialize)]
pub struct Query {
    quote: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    #[serde(flatten)]
    pub position: Position,
    pub risk: Option<RiskLevel>,
}

#[get("/positions")]
async fn index(
    state: web::Data<AppState<State>>,
    query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let snapshot = state.positions.snapshot().await;

    let views: Vec<PositionView> = snapshot
        .data
        .into_iter()
        .filter(|position| match &query.quote {
            Some(quote) => position.quote_token.matches(quote),
            None => true,
        })
        .map(|position| PositionView {
            risk: position_risk(&position),
            position,
        })
        .collect();

    Ok(HttpResponse::Ok().json(views))
}
