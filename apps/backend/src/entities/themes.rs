use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::personalities::Entity")]
    Personalities,
    #[sea_orm(has_many = "super::theme_attribute_configs::Entity")]
    AttributeConfigs,
}

impl Related<super::personalities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Personalities.def()
    }
}

impl Related<super::theme_attribute_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeConfigs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
