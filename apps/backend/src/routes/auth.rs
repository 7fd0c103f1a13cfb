use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;
use crate::validation::validate_phone;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub phone: String,
}

/// Login or create a user keyed by phone number.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let phone = body.phone.trim().to_owned();
    validate_phone(&phone)?;

    let user = with_txn(&app_state, async move |txn| {
        ensure_user(txn, &phone).await
    })
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        user_id: user.id,
        phone: user.phone,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
