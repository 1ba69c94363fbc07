use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[derive(Debug, Deserialize)]
pub struct Query {
    wallet: String,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub allowed: bool,
}

/// Proactive ownership probe so the dashboard can gate lender forms
/// before a submission bounces. Fail-closed like the gate itself.
#[get("/access")]
async fn index(
    state: web::Data<AppState<State>>,
    query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let allowed = state.api.gate().has_required_asset(&query.wallet).await;
    Ok(HttpResponse::Ok().json(Response { allowed }))
}
