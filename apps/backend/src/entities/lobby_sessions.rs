use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LobbyStatus {
    #[sea_orm(string_value = "ACTIVE")]
    #[serde(rename = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "ENDED_REPLACED")]
    #[serde(rename = "ENDED_REPLACED")]
    EndedReplaced,
    #[sea_orm(string_value = "ENDED_EXIT")]
    #[serde(rename = "ENDED_EXIT")]
    EndedExit,
    #[sea_orm(string_value = "ENDED_STARTED")]
    #[serde(rename = "ENDED_STARTED")]
    EndedStarted,
    #[sea_orm(string_value = "EXPIRED")]
    #[serde(rename = "EXPIRED")]
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LobbyMode {
    #[sea_orm(string_value = "THEME_MENU")]
    #[serde(rename = "THEME_MENU")]
    ThemeMenu,
    #[sea_orm(string_value = "THEME_SELECTED")]
    #[serde(rename = "THEME_SELECTED")]
    ThemeSelected,
    #[sea_orm(string_value = "ENDED")]
    #[serde(rename = "ENDED")]
    Ended,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lobby_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "user_id")]
    pub user_id: String,
    pub status: LobbyStatus,
    pub mode: LobbyMode,
    #[sea_orm(column_name = "selected_theme_id", nullable)]
    pub selected_theme_id: Option<String>,
    #[sea_orm(column_name = "last_activity_at")]
    pub last_activity_at: OffsetDateTime,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "ended_at", nullable)]
    pub ended_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
