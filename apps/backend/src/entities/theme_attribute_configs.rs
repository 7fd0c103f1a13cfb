use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How an attribute question is answered: yes/no or a short free value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AnswerType {
    #[sea_orm(string_value = "YESNO")]
    #[serde(rename = "YESNO")]
    YesNo,
    #[sea_orm(string_value = "VALUE")]
    #[serde(rename = "VALUE")]
    Value,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "theme_attribute_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "theme_id")]
    pub theme_id: String,
    pub key: String,
    #[sea_orm(column_name = "answer_type")]
    pub answer_type: AnswerType,
    #[sea_orm(column_type = "SmallInteger")]
    pub strength: i16,
    #[sea_orm(column_name = "group_id")]
    pub group_id: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id"
    )]
    Theme,
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
