use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::theme_attribute_configs as configs;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Enabled configs for a theme, minus already-used keys, weakest first.
pub async fn list_available<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
    used_keys: &[String],
) -> Result<Vec<configs::Model>, DomainError> {
    let mut query = configs::Entity::find()
        .filter(configs::Column::ThemeId.eq(theme_id))
        .filter(configs::Column::Enabled.eq(true));
    if !used_keys.is_empty() {
        query = query.filter(configs::Column::Key.is_not_in(used_keys.iter().cloned()));
    }
    query
        .order_by_asc(configs::Column::Strength)
        .all(conn)
        .await
        .map_err(map_db_err)
}
