use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::pool_balance,
    types::PoolActionParams,
};

#[derive(Debug, Serialize)]
pub struct Submitted {
    pub signature: String,
}

#[get("/pools/balance")]
async fn index(state: web::Data<AppState<State>>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(state.pool_balance.snapshot().await))
}

#[post("/pools/deposit")]
async fn deposit(
    state: web::Data<AppState<State>>,
    body: web::Json<PoolActionParams>,
) -> Result<HttpResponse, Error> {
    let signature = pool_balance::deposit(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Submitted { signature }))
}

#[post("/pools/withdraw")]
async fn withdraw(
    state: web::Data<AppState<State>>,
    body: web::Json<PoolActionParams>,
) -> Result<HttpResponse, Error> {
    let signature = pool_balance::withdraw(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Submitted { signature }))
}
