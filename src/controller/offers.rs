use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    aggregation::offer_utilization,
    configuration::{AppState, State},
    error::Error,
    handler::offers,
    types::{ChangeLtvParams, CreateOfferParams, Offer, UpdateOfferParams},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    #[serde(flatten)]
    pub offer: Offer,
    pub utilization: f64,
}

#[derive(Debug, Serialize)]
pub struct Submitted {
    pub signature: String,
}

#[get("/offers")]
async fn index(state: web::Data<AppState<State>>) -> Result<HttpResponse, Error> {
    let snapshot = state.offers.snapshot().await;

    let views: Vec<OfferView> = snapshot
        .data
        .into_iter()
        .map(|offer| OfferView {
            utilization: offer_utilization(&offer),
            offer,
        })
        .collect();

    Ok(HttpResponse::Ok().json(views))
}

/// Market-wide offer list, unscoped; the lender views read from the
/// polled feed instead.
#[get("/offers/market")]
async fn market(state: web::Data<AppState<State>>) -> Result<HttpResponse, Error> {
    let offers = state.api.offers().await.map_err(Error::from)?;
    Ok(HttpResponse::Ok().json(offers))
}

#[post("/offers/create")]
async fn create(
    state: web::Data<AppState<State>>,
    body: web::Json<CreateOfferParams>,
) -> Result<HttpResponse, Error> {
    let signature = offers::create_offer(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Submitted { signature }))
}

#[post("/offers/update")]
async fn update(
    state: web::Data<AppState<State>>,
    body: web::Json<UpdateOfferParams>,
) -> Result<HttpResponse, Error> {
    let signature = offers::update_offer(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Submitted { signature }))
}

#[post("/offers/change-ltv")]
async fn change_ltv(
    state: web::Data<AppState<State>>,
    body: web::Json<ChangeLtvParams>,
) -> Result<HttpResponse, Error> {
    let signature = offers::change_ltv(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Submitted { signature }))
}
