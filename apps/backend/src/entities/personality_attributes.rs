use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::theme_attribute_configs::AnswerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personality_attributes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "personality_id")]
    pub personality_id: String,
    pub key: String,
    pub value: String,
    #[sea_orm(column_name = "answer_type")]
    pub answer_type: AnswerType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::personalities::Entity",
        from = "Column::PersonalityId",
        to = "super::personalities::Column::Id"
    )]
    Personality,
}

impl Related<super::personalities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Personality.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
