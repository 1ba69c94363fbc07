use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/version")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, Error> {
    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

    Ok(web::Json(Response {
        version: VERSION,
        network: state.config.network.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub version: Option<&'static str>,
    pub network: String,
}
