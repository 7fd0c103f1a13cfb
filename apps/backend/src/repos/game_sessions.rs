use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use time::OffsetDateTime;

use crate::entities::game_sessions::{self, GameMode, GameStatus};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<game_sessions::Model>, DomainError> {
    game_sessions::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Mark every active game session for the user as replaced. At most one
/// should exist, but the bulk form also repairs any historical duplicates.
pub async fn supersede_active<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<(), DomainError> {
    game_sessions::Entity::update_many()
        .col_expr(
            game_sessions::Column::Status,
            Expr::value(GameStatus::EndedReplaced),
        )
        .col_expr(game_sessions::Column::Mode, Expr::value(GameMode::Ended))
        .col_expr(
            game_sessions::Column::EndedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(game_sessions::Column::UserId.eq(user_id))
        .filter(game_sessions::Column::Status.eq(GameStatus::Active))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    am: game_sessions::ActiveModel,
) -> Result<game_sessions::Model, DomainError> {
    am.insert(conn).await.map_err(map_db_err)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    am: game_sessions::ActiveModel,
) -> Result<game_sessions::Model, DomainError> {
    am.update(conn).await.map_err(map_db_err)
}
