use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::personality_attributes as attrs;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub async fn find_value<C: ConnectionTrait>(
    conn: &C,
    personality_id: &str,
    key: &str,
) -> Result<Option<attrs::Model>, DomainError> {
    attrs::Entity::find()
        .filter(attrs::Column::PersonalityId.eq(personality_id))
        .filter(attrs::Column::Key.eq(key))
        .one(conn)
        .await
        .map_err(map_db_err)
}
