//! User lookup and idempotent creation by phone.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, DomainError> {
    users::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn find_by_phone<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
) -> Result<Option<users::Model>, DomainError> {
    users::Entity::find()
        .filter(users::Column::Phone.eq(phone))
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn list_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: &[String],
) -> Result<Vec<users::Model>, DomainError> {
    users::Entity::find()
        .filter(users::Column::Id.is_in(ids.iter().cloned()))
        .all(conn)
        .await
        .map_err(map_db_err)
}

/// Insert a user for this phone if none exists, then return the row.
/// Safe against concurrent first logins for the same phone.
pub async fn upsert_by_phone<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
) -> Result<users::Model, DomainError> {
    let candidate = users::ActiveModel {
        id: Set(super::new_id()),
        phone: Set(phone.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    users::Entity::insert(candidate)
        .on_conflict(
            OnConflict::column(users::Column::Phone)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    find_by_phone(conn, phone).await?.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "user missing immediately after upsert",
        )
    })
}
