use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::lobby;
use crate::state::app_state::AppState;
use crate::validation::{validate_digit, validate_user_id};

#[derive(Debug, Deserialize)]
pub struct MenuRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LobbyDtmfRequest {
    #[serde(default)]
    pub user_id: String,
    pub digit: u8,
}

/// Open (or reset to) the theme menu for a user.
async fn menu(
    body: ValidatedJson<MenuRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_user_id(&body.user_id)?;

    let user_id = body.user_id.clone();
    let resp = with_txn(&app_state, async move |txn| {
        lobby::menu(txn, &user_id).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(resp))
}

/// Feed a DTMF digit to the lobby's state machine.
async fn input_dtmf(
    body: ValidatedJson<LobbyDtmfRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    validate_user_id(&input.user_id)?;
    validate_digit(input.digit)?;

    let ai = app_state.ai().clone();
    let outcome = with_txn(&app_state, async move |txn| {
        lobby::input_dtmf(txn, &ai, &input.user_id, input.digit).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/menu").route(web::post().to(menu)));
    cfg.service(web::resource("/input/dtmf").route(web::post().to(input_dtmf)));
}
