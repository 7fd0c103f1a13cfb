use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::ai_question_texts as texts;
use crate::entities::AnswerType;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_text<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
    attr_key: &str,
    answer_type: AnswerType,
) -> Result<Option<texts::Model>, DomainError> {
    texts::Entity::find()
        .filter(texts::Column::ThemeId.eq(theme_id))
        .filter(texts::Column::AttrKey.eq(attr_key))
        .filter(texts::Column::AnswerType.eq(answer_type))
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// First writer wins; concurrent inserts for the same key converge on one row.
pub async fn insert_or_get<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
    attr_key: &str,
    answer_type: AnswerType,
    text: &str,
) -> Result<texts::Model, DomainError> {
    let am = texts::ActiveModel {
        id: Set(super::new_id()),
        theme_id: Set(theme_id.to_string()),
        attr_key: Set(attr_key.to_string()),
        answer_type: Set(answer_type),
        text: Set(text.to_string()),
    };

    texts::Entity::insert(am)
        .on_conflict(
            OnConflict::columns([
                texts::Column::ThemeId,
                texts::Column::AttrKey,
                texts::Column::AnswerType,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    find_text(conn, theme_id, attr_key, answer_type)
        .await?
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                "question text missing immediately after upsert",
            )
        })
}
