use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::game_results;
use crate::entities::game_sessions::GameStatus;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

/// Values recorded for a finished session.
#[derive(Debug, Clone)]
pub struct NewGameResult {
    pub session_id: String,
    pub user_id: String,
    pub theme_id: String,
    pub status: GameStatus,
    pub score: i32,
    pub hints_used: i16,
    pub wrong_guesses: i16,
    pub duration_sec: i32,
}

/// Insert-or-update keyed by session id, so a terminal transition that runs
/// twice recomputes the same row instead of failing.
pub async fn upsert_by_session<C: ConnectionTrait>(
    conn: &C,
    result: NewGameResult,
) -> Result<game_results::Model, DomainError> {
    let session_id = result.session_id.clone();
    let am = game_results::ActiveModel {
        id: Set(super::new_id()),
        session_id: Set(result.session_id),
        user_id: Set(result.user_id),
        theme_id: Set(result.theme_id),
        status: Set(result.status),
        score: Set(result.score),
        hints_used: Set(result.hints_used),
        wrong_guesses: Set(result.wrong_guesses),
        duration_sec: Set(result.duration_sec),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    game_results::Entity::insert(am)
        .on_conflict(
            OnConflict::column(game_results::Column::SessionId)
                .update_columns([
                    game_results::Column::Status,
                    game_results::Column::Score,
                    game_results::Column::HintsUsed,
                    game_results::Column::WrongGuesses,
                    game_results::Column::DurationSec,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    find_by_session(conn, &session_id).await?.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "game result missing immediately after upsert",
        )
    })
}

pub async fn find_by_session<C: ConnectionTrait>(
    conn: &C,
    session_id: &str,
) -> Result<Option<game_results::Model>, DomainError> {
    game_results::Entity::find()
        .filter(game_results::Column::SessionId.eq(session_id))
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Results feeding the leaderboard: a theme's rows in scoring statuses.
pub async fn list_for_leaderboard<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
) -> Result<Vec<game_results::Model>, DomainError> {
    game_results::Entity::find()
        .filter(game_results::Column::ThemeId.eq(theme_id))
        .filter(
            game_results::Column::Status
                .is_in([GameStatus::Won, GameStatus::FailedGuesses]),
        )
        .all(conn)
        .await
        .map_err(map_db_err)
}
