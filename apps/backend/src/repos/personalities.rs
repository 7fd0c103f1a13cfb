use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::{personalities, personality_aliases};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<personalities::Model>, DomainError> {
    personalities::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn list_by_theme<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
) -> Result<Vec<personalities::Model>, DomainError> {
    personalities::Entity::find()
        .filter(personalities::Column::ThemeId.eq(theme_id))
        .all(conn)
        .await
        .map_err(map_db_err)
}

/// Every personality of a theme paired with its aliases. The guess matcher
/// scores names and aliases alike.
pub async fn list_with_aliases<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
) -> Result<Vec<(personalities::Model, Vec<personality_aliases::Model>)>, DomainError> {
    personalities::Entity::find()
        .filter(personalities::Column::ThemeId.eq(theme_id))
        .find_with_related(personality_aliases::Entity)
        .all(conn)
        .await
        .map_err(map_db_err)
}
