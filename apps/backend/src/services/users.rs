//! User resolution. Login is an idempotent upsert keyed by phone.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::masking::mask_phone;
use crate::entities::users;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos;

/// Find-or-create a user by phone. Returns the same row for every login
/// with the same number, including concurrent first logins.
pub async fn ensure_user<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
) -> Result<users::Model, AppError> {
    let user = repos::users::upsert_by_phone(conn, phone).await?;
    info!(user_id = %user.id, phone = %mask_phone(phone), "user resolved");
    Ok(user)
}

/// Look up a user by id. Unknown ids are reported as invalid input rather
/// than leaking whether an id shape exists.
pub async fn find_user_by_id<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<users::Model, AppError> {
    repos::users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::invalid(ErrorCode::InvalidUserId, "Invalid user_id"))
}
