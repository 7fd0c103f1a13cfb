use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::game::{self, StartGame};
use crate::state::app_state::AppState;
use crate::validation::{
    clean_guess, validate_digit, validate_phone, validate_session_id, validate_theme_id,
    validate_user_id,
};

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub theme_id: String,
    pub user_id: Option<String>,
    pub user_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DtmfRequest {
    #[serde(default)]
    pub session_id: String,
    pub digit: u8,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RevealRequest {
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, serde::Serialize)]
struct ThemesResponse {
    themes: Vec<crate::entities::themes::Model>,
}

/// List the theme catalog, ordered by name.
async fn themes(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let themes = game::list_themes(app_state.db()).await?;
    Ok(HttpResponse::Ok().json(ThemesResponse { themes }))
}

/// Start a new game session, superseding any active one for the user.
async fn start(
    body: ValidatedJson<StartGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    validate_theme_id(&input.theme_id)?;
    if let Some(ref user_id) = input.user_id {
        validate_user_id(user_id)?;
    }
    if let Some(ref phone) = input.user_phone {
        validate_phone(phone.trim())?;
    }

    let ai = app_state.ai().clone();
    let resp = with_txn(&app_state, async move |txn| {
        game::start(
            txn,
            &ai,
            StartGame {
                theme_id: input.theme_id,
                user_id: input.user_id,
                user_phone: input.user_phone,
            },
        )
        .await
    })
    .await?;

    Ok(HttpResponse::Ok().json(resp))
}

/// Feed a DTMF digit to the session's state machine.
async fn input_dtmf(
    body: ValidatedJson<DtmfRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    validate_session_id(&input.session_id)?;
    validate_digit(input.digit)?;

    let ai = app_state.ai().clone();
    let outcome = with_txn(&app_state, async move |txn| {
        game::input_dtmf(txn, &ai, &input.session_id, input.digit).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Submit a free-text guess for the hidden personality.
async fn guess(
    body: ValidatedJson<GuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    validate_session_id(&input.session_id)?;
    let text = clean_guess(&input.text)?;

    let ai = app_state.ai().clone();
    let resp = with_txn(&app_state, async move |txn| {
        game::guess(txn, &ai, &input.session_id, &text).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(resp))
}

/// Reveal the hidden personality without mutating the session.
async fn debug_reveal(
    body: ValidatedJson<RevealRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_session_id(&body.session_id)?;

    let reveal = game::debug_reveal(app_state.db(), &body.session_id).await?;
    Ok(HttpResponse::Ok().json(reveal))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/themes").route(web::get().to(themes)));
    cfg.service(web::resource("/start").route(web::post().to(start)));
    cfg.service(web::resource("/input/dtmf").route(web::post().to(input_dtmf)));
    cfg.service(web::resource("/guess").route(web::post().to(guess)));
    cfg.service(web::resource("/debug/reveal").route(web::post().to(debug_reveal)));
}
