use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::theme_attribute_configs::AnswerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_question_texts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "theme_id")]
    pub theme_id: String,
    #[sea_orm(column_name = "attr_key")]
    pub attr_key: String,
    #[sea_orm(column_name = "answer_type")]
    pub answer_type: AnswerType,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
