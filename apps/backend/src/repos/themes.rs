use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::themes;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<themes::Model>, DomainError> {
    themes::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// All themes, name ascending. The lobby digit map depends on this order.
pub async fn list_by_name<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<themes::Model>, DomainError> {
    themes::Entity::find()
        .order_by_asc(themes::Column::Name)
        .all(conn)
        .await
        .map_err(map_db_err)
}
