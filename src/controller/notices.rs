use actix_web::{get, post, web, HttpResponse};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

/// Returns-and-clears queued toasts; the access-modal flag rides along
/// and stays up until dismissed.
#[get("/notices")]
async fn index(state: web::Data<AppState<State>>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(state.notifier.drain().await))
}

#[post("/notices/dismiss")]
async fn dismiss(state: web::Data<AppState<State>>) -> Result<HttpResponse, Error> {
    state.notifier.dismiss_access_modal();
    Ok(HttpResponse::NoContent().finish())
}
