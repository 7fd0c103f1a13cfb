use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GameStatus {
    #[sea_orm(string_value = "ACTIVE")]
    #[serde(rename = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "WON")]
    #[serde(rename = "WON")]
    Won,
    #[sea_orm(string_value = "FAILED_HINTS")]
    #[serde(rename = "FAILED_HINTS")]
    FailedHints,
    #[sea_orm(string_value = "FAILED_GUESSES")]
    #[serde(rename = "FAILED_GUESSES")]
    FailedGuesses,
    #[sea_orm(string_value = "FAILED_TIMEOUT")]
    #[serde(rename = "FAILED_TIMEOUT")]
    FailedTimeout,
    #[sea_orm(string_value = "ENDED_EXIT")]
    #[serde(rename = "ENDED_EXIT")]
    EndedExit,
    #[sea_orm(string_value = "ENDED_REPLACED")]
    #[serde(rename = "ENDED_REPLACED")]
    EndedReplaced,
}

impl GameStatus {
    /// Terminal statuses that produce a persisted result row.
    pub fn is_scored(self) -> bool {
        matches!(
            self,
            GameStatus::Won
                | GameStatus::FailedHints
                | GameStatus::FailedGuesses
                | GameStatus::FailedTimeout
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GameMode {
    #[sea_orm(string_value = "QUESTION_SET")]
    #[serde(rename = "QUESTION_SET")]
    QuestionSet,
    #[sea_orm(string_value = "HINT_SELECTION")]
    #[serde(rename = "HINT_SELECTION")]
    HintSelection,
    #[sea_orm(string_value = "GUESS_INPUT")]
    #[serde(rename = "GUESS_INPUT")]
    GuessInput,
    #[sea_orm(string_value = "GUESS_CONFIRM")]
    #[serde(rename = "GUESS_CONFIRM")]
    GuessConfirm,
    #[sea_orm(string_value = "ENDED")]
    #[serde(rename = "ENDED")]
    Ended,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "user_id")]
    pub user_id: String,
    #[sea_orm(column_name = "theme_id")]
    pub theme_id: String,
    pub status: GameStatus,
    pub mode: GameMode,
    #[sea_orm(column_name = "selected_personality_id")]
    pub selected_personality_id: String,
    #[sea_orm(column_name = "hints_used")]
    pub hints_used: i16,
    #[sea_orm(column_name = "max_hints")]
    pub max_hints: i16,
    #[sea_orm(column_name = "wrong_guesses")]
    pub wrong_guesses: i16,
    #[sea_orm(column_name = "max_guesses")]
    pub max_guesses: i16,
    #[sea_orm(column_name = "used_attr_keys", column_type = "Json")]
    pub used_attr_keys: Json,
    #[sea_orm(column_name = "pending_question_set", column_type = "Json")]
    pub pending_question_set: Json,
    #[sea_orm(column_name = "pending_guess_candidate_id", nullable)]
    pub pending_guess_candidate_id: Option<String>,
    #[sea_orm(column_name = "qa_history", column_type = "Json")]
    pub qa_history: Json,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
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
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id"
    )]
    Theme,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
