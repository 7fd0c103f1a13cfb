use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Phone,
    CreatedAt,
}

#[derive(Iden)]
enum Themes {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ThemeAttributeConfigs {
    Table,
    Id,
    ThemeId,
    Key,
    AnswerType,
    Strength,
    GroupId,
    Enabled,
}

#[derive(Iden)]
enum Personalities {
    Table,
    Id,
    ThemeId,
    Name,
}

#[derive(Iden)]
enum PersonalityAliases {
    Table,
    Id,
    PersonalityId,
    Alias,
}

#[derive(Iden)]
enum PersonalityAttributes {
    Table,
    Id,
    PersonalityId,
    Key,
    AnswerType,
    Value,
}

#[derive(Iden)]
enum LobbySessions {
    Table,
    Id,
    UserId,
    Status,
    Mode,
    SelectedThemeId,
    LastActivityAt,
    CreatedAt,
    EndedAt,
}

#[derive(Iden)]
enum GameSessions {
    Table,
    Id,
    UserId,
    ThemeId,
    Status,
    Mode,
    SelectedPersonalityId,
    HintsUsed,
    MaxHints,
    WrongGuesses,
    MaxGuesses,
    UsedAttrKeys,
    PendingQuestionSet,
    PendingGuessCandidateId,
    QaHistory,
    Prompt,
    LastActivityAt,
    CreatedAt,
    EndedAt,
}

#[derive(Iden)]
enum GameResults {
    Table,
    Id,
    SessionId,
    UserId,
    ThemeId,
    Status,
    Score,
    HintsUsed,
    WrongGuesses,
    DurationSec,
    CreatedAt,
}

#[derive(Iden)]
enum AiQuestionTexts {
    Table,
    Id,
    ThemeId,
    AttrKey,
    AnswerType,
    Text,
}

// Statuses and modes are stored as plain strings (not native Postgres enums)
// so the same schema runs on both Postgres and SQLite.

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Phone).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // themes
        manager
            .create_table(
                Table::create()
                    .table(Themes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Themes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Themes::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // theme_attribute_configs
        manager
            .create_table(
                Table::create()
                    .table(ThemeAttributeConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::ThemeId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ThemeAttributeConfigs::Key).string().not_null())
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::AnswerType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::Strength)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::GroupId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ThemeAttributeConfigs::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_theme_attribute_configs_theme_id")
                            .from(ThemeAttributeConfigs::Table, ThemeAttributeConfigs::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_theme_attribute_configs_theme_key")
                    .table(ThemeAttributeConfigs::Table)
                    .col(ThemeAttributeConfigs::ThemeId)
                    .col(ThemeAttributeConfigs::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // personalities
        manager
            .create_table(
                Table::create()
                    .table(Personalities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Personalities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Personalities::ThemeId).string().not_null())
                    .col(ColumnDef::new(Personalities::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personalities_theme_id")
                            .from(Personalities::Table, Personalities::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_personalities_theme_id")
                    .table(Personalities::Table)
                    .col(Personalities::ThemeId)
                    .to_owned(),
            )
            .await?;

        // personality_aliases
        manager
            .create_table(
                Table::create()
                    .table(PersonalityAliases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersonalityAliases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PersonalityAliases::PersonalityId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PersonalityAliases::Alias).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personality_aliases_personality_id")
                            .from(PersonalityAliases::Table, PersonalityAliases::PersonalityId)
                            .to(Personalities::Table, Personalities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_personality_aliases_personality_id")
                    .table(PersonalityAliases::Table)
                    .col(PersonalityAliases::PersonalityId)
                    .to_owned(),
            )
            .await?;

        // personality_attributes
        manager
            .create_table(
                Table::create()
                    .table(PersonalityAttributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersonalityAttributes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PersonalityAttributes::PersonalityId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PersonalityAttributes::Key).string().not_null())
                    .col(
                        ColumnDef::new(PersonalityAttributes::AnswerType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PersonalityAttributes::Value).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personality_attributes_personality_id")
                            .from(
                                PersonalityAttributes::Table,
                                PersonalityAttributes::PersonalityId,
                            )
                            .to(Personalities::Table, Personalities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_personality_attributes_personality_key")
                    .table(PersonalityAttributes::Table)
                    .col(PersonalityAttributes::PersonalityId)
                    .col(PersonalityAttributes::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // lobby_sessions
        manager
            .create_table(
                Table::create()
                    .table(LobbySessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LobbySessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LobbySessions::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(LobbySessions::Status).string().not_null())
                    .col(ColumnDef::new(LobbySessions::Mode).string().not_null())
                    .col(ColumnDef::new(LobbySessions::SelectedThemeId).string().null())
                    .col(
                        ColumnDef::new(LobbySessions::LastActivityAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LobbySessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LobbySessions::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lobby_sessions_user_id")
                            .from(LobbySessions::Table, LobbySessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // game_sessions
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameSessions::UserId).string().not_null())
                    .col(ColumnDef::new(GameSessions::ThemeId).string().not_null())
                    .col(ColumnDef::new(GameSessions::Status).string().not_null())
                    .col(ColumnDef::new(GameSessions::Mode).string().not_null())
                    .col(
                        ColumnDef::new(GameSessions::SelectedPersonalityId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::HintsUsed)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::MaxHints)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::WrongGuesses)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::MaxGuesses)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameSessions::UsedAttrKeys).json().not_null())
                    .col(
                        ColumnDef::new(GameSessions::PendingQuestionSet)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::PendingGuessCandidateId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(GameSessions::QaHistory).json().not_null())
                    .col(ColumnDef::new(GameSessions::Prompt).text().not_null())
                    .col(
                        ColumnDef::new(GameSessions::LastActivityAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_user_id")
                            .from(GameSessions::Table, GameSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_theme_id")
                            .from(GameSessions::Table, GameSessions::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // supersede scans filter on (user_id, status)
        manager
            .create_index(
                Index::create()
                    .name("ix_game_sessions_user_status")
                    .table(GameSessions::Table)
                    .col(GameSessions::UserId)
                    .col(GameSessions::Status)
                    .to_owned(),
            )
            .await?;

        // game_results
        manager
            .create_table(
                Table::create()
                    .table(GameResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameResults::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameResults::SessionId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GameResults::UserId).string().not_null())
                    .col(ColumnDef::new(GameResults::ThemeId).string().not_null())
                    .col(ColumnDef::new(GameResults::Status).string().not_null())
                    .col(ColumnDef::new(GameResults::Score).integer().not_null())
                    .col(
                        ColumnDef::new(GameResults::HintsUsed)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameResults::WrongGuesses)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameResults::DurationSec).integer().not_null())
                    .col(
                        ColumnDef::new(GameResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_results_user_id")
                            .from(GameResults::Table, GameResults::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // leaderboard scans filter on (theme_id, status)
        manager
            .create_index(
                Index::create()
                    .name("ix_game_results_theme_status")
                    .table(GameResults::Table)
                    .col(GameResults::ThemeId)
                    .col(GameResults::Status)
                    .to_owned(),
            )
            .await?;

        // ai_question_texts
        manager
            .create_table(
                Table::create()
                    .table(AiQuestionTexts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiQuestionTexts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiQuestionTexts::ThemeId).string().not_null())
                    .col(ColumnDef::new(AiQuestionTexts::AttrKey).string().not_null())
                    .col(
                        ColumnDef::new(AiQuestionTexts::AnswerType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiQuestionTexts::Text).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_ai_question_texts_theme_attr_type")
                    .table(AiQuestionTexts::Table)
                    .col(AiQuestionTexts::ThemeId)
                    .col(AiQuestionTexts::AttrKey)
                    .col(AiQuestionTexts::AnswerType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in dependency order
        manager
            .drop_table(Table::drop().table(AiQuestionTexts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LobbySessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonalityAttributes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonalityAliases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Personalities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ThemeAttributeConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
