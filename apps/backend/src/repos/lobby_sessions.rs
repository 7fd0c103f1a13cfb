use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::lobby_sessions::{self, LobbyMode, LobbyStatus};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn find_by_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Option<lobby_sessions::Model>, DomainError> {
    lobby_sessions::Entity::find()
        .filter(lobby_sessions::Column::UserId.eq(user_id))
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Mark any active lobby session for the user as replaced.
pub async fn supersede_active<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<(), DomainError> {
    lobby_sessions::Entity::update_many()
        .col_expr(
            lobby_sessions::Column::Status,
            Expr::value(LobbyStatus::EndedReplaced),
        )
        .col_expr(lobby_sessions::Column::Mode, Expr::value(LobbyMode::Ended))
        .col_expr(
            lobby_sessions::Column::EndedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(lobby_sessions::Column::UserId.eq(user_id))
        .filter(lobby_sessions::Column::Status.eq(LobbyStatus::Active))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

/// Insert or reset the user's single lobby row to a fresh theme menu.
pub async fn reset_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<lobby_sessions::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    match find_by_user(conn, user_id).await? {
        Some(existing) => {
            let mut am: lobby_sessions::ActiveModel = existing.into();
            am.status = Set(LobbyStatus::Active);
            am.mode = Set(LobbyMode::ThemeMenu);
            am.selected_theme_id = Set(None);
            am.last_activity_at = Set(now);
            am.ended_at = Set(None);
            am.update(conn).await.map_err(map_db_err)
        }
        None => {
            let am = lobby_sessions::ActiveModel {
                id: Set(super::new_id()),
                user_id: Set(user_id.to_string()),
                status: Set(LobbyStatus::Active),
                mode: Set(LobbyMode::ThemeMenu),
                selected_theme_id: Set(None),
                last_activity_at: Set(now),
                created_at: Set(now),
                ended_at: Set(None),
            };
            am.insert(conn).await.map_err(map_db_err)
        }
    }
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    am: lobby_sessions::ActiveModel,
) -> Result<lobby_sessions::Model, DomainError> {
    am.update(conn).await.map_err(map_db_err)
}
