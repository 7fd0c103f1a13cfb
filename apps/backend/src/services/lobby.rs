//! The per-user lobby state machine: theme menu, selection, hand-off to a
//! game.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, Set};
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::ai::TextGenerator;
use crate::entities::lobby_sessions::{self, LobbyMode, LobbyStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::protocol::{LobbyOutcome, LobbyResponse, ThemeChoice};
use crate::repos;
use crate::services::{game, users};

/// Only the first eight themes fit on the keypad; 9 is reserved for exit.
pub const MENU_SLOTS: usize = 8;

pub const IDLE_TIMEOUT: Duration = Duration::minutes(10);

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn is_timed_out(last_activity_at: OffsetDateTime) -> bool {
    now() - last_activity_at >= IDLE_TIMEOUT
}

/// Build (or rebuild) the theme menu for a user.
pub async fn menu<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<LobbyResponse, AppError> {
    let user = users::find_user_by_id(conn, user_id).await?;

    repos::lobby_sessions::supersede_active(conn, &user.id).await?;
    let lobby = repos::lobby_sessions::reset_for_user(conn, &user.id).await?;

    let themes = repos::themes::list_by_name(conn).await?;
    let listed = &themes[..themes.len().min(MENU_SLOTS)];

    let mut digit_map = BTreeMap::new();
    let mut parts = Vec::with_capacity(listed.len());
    let mut allowed: Vec<u8> = Vec::with_capacity(listed.len() + 1);
    for (i, theme) in listed.iter().enumerate() {
        let digit = (i + 1) as u8;
        digit_map.insert(digit.to_string(), ThemeChoice {
            theme_id: theme.id.clone(),
            label: theme.name.clone(),
        });
        parts.push(format!("Press {digit} for {}.", theme.name));
        allowed.push(digit);
    }
    allowed.push(9);

    let prompt = format!("Welcome to AI Genie. {} Press 9 to exit.", parts.join(" "));

    Ok(LobbyResponse {
        lobby_id: Some(lobby.id),
        status: lobby.status,
        mode: lobby.mode,
        prompt,
        allowed_digits: allowed,
        digit_map: Some(digit_map),
        selected: None,
    })
}

/// Dispatch a DTMF digit against the lobby's current mode. A press with no
/// active lobby transparently rebuilds the menu.
pub async fn input_dtmf<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    user_id: &str,
    digit: u8,
) -> Result<LobbyOutcome, AppError> {
    let user = users::find_user_by_id(conn, user_id).await?;

    let Some(lobby) = repos::lobby_sessions::find_by_user(conn, &user.id)
        .await?
        .filter(|l| l.status == LobbyStatus::Active)
    else {
        return menu(conn, &user.id).await.map(LobbyOutcome::Lobby);
    };

    if is_timed_out(lobby.last_activity_at) {
        let mut am: lobby_sessions::ActiveModel = lobby.into();
        am.status = Set(LobbyStatus::Expired);
        am.mode = Set(LobbyMode::Ended);
        am.ended_at = Set(Some(now()));
        repos::lobby_sessions::update(conn, am).await?;
        return Ok(LobbyOutcome::Lobby(LobbyResponse {
            lobby_id: None,
            status: LobbyStatus::Expired,
            mode: LobbyMode::Ended,
            prompt: "Lobby expired due to inactivity. Call menu again.".to_string(),
            allowed_digits: vec![],
            digit_map: None,
            selected: None,
        }));
    }

    if digit == 9 {
        let mut am: lobby_sessions::ActiveModel = lobby.into();
        am.status = Set(LobbyStatus::EndedExit);
        am.mode = Set(LobbyMode::Ended);
        am.ended_at = Set(Some(now()));
        am.last_activity_at = Set(now());
        let ended = repos::lobby_sessions::update(conn, am).await?;
        return Ok(LobbyOutcome::Lobby(LobbyResponse {
            lobby_id: Some(ended.id),
            status: ended.status,
            mode: ended.mode,
            prompt: "Exited. Call menu to start again.".to_string(),
            allowed_digits: vec![],
            digit_map: None,
            selected: None,
        }));
    }

    match lobby.mode {
        LobbyMode::ThemeMenu => select_theme(conn, lobby, digit).await.map(LobbyOutcome::Lobby),
        LobbyMode::ThemeSelected => match digit {
            0 => {
                let user_id = lobby.user_id.clone();
                let mut am: lobby_sessions::ActiveModel = lobby.into();
                am.mode = Set(LobbyMode::ThemeMenu);
                am.selected_theme_id = Set(None);
                am.last_activity_at = Set(now());
                repos::lobby_sessions::update(conn, am).await?;
                menu(conn, &user_id).await.map(LobbyOutcome::Lobby)
            }
            1 => start_game(conn, ai, lobby).await.map(LobbyOutcome::Session),
            _ => Err(AppError::invalid(
                ErrorCode::DigitNotAllowed,
                "Invalid digit for THEME_SELECTED",
            )),
        },
        LobbyMode::Ended => Err(AppError::invalid(
            ErrorCode::ModeViolation,
            "Invalid lobby mode",
        )),
    }
}

/// THEME_MENU: digits 1..=8 pick from the listed themes, 1-based.
async fn select_theme<C: ConnectionTrait>(
    conn: &C,
    lobby: lobby_sessions::Model,
    digit: u8,
) -> Result<LobbyResponse, AppError> {
    let themes = repos::themes::list_by_name(conn).await?;
    let slots = themes.len().min(MENU_SLOTS);
    if digit == 0 || usize::from(digit) > slots {
        return Err(AppError::invalid(
            ErrorCode::DigitNotAllowed,
            "Invalid digit for theme selection",
        ));
    }
    let selected = &themes[usize::from(digit) - 1];

    let mut am: lobby_sessions::ActiveModel = lobby.into();
    am.mode = Set(LobbyMode::ThemeSelected);
    am.selected_theme_id = Set(Some(selected.id.clone()));
    am.last_activity_at = Set(now());
    let updated = repos::lobby_sessions::update(conn, am).await?;

    Ok(LobbyResponse {
        lobby_id: Some(updated.id),
        status: updated.status,
        mode: updated.mode,
        prompt: format!(
            "{} selected. Press 1 to start the game. Press 0 to go back. Press 9 to exit.",
            selected.name
        ),
        allowed_digits: vec![0, 1, 9],
        digit_map: None,
        selected: Some(ThemeChoice {
            theme_id: selected.id.clone(),
            label: selected.name.clone(),
        }),
    })
}

/// THEME_SELECTED digit 1: close the lobby and delegate to the game machine.
/// The lobby's response is the game's start response.
async fn start_game<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    lobby: lobby_sessions::Model,
) -> Result<crate::protocol::SessionResponse, AppError> {
    let Some(theme_id) = lobby.selected_theme_id.clone() else {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "No theme selected",
        ));
    };
    let user_id = lobby.user_id.clone();

    repos::game_sessions::supersede_active(conn, &user_id).await?;

    let mut am: lobby_sessions::ActiveModel = lobby.into();
    am.status = Set(LobbyStatus::EndedStarted);
    am.ended_at = Set(Some(now()));
    am.last_activity_at = Set(now());
    repos::lobby_sessions::update(conn, am).await?;

    info!(user_id = %user_id, theme_id = %theme_id, "lobby handed off to game");

    game::start(conn, ai, game::StartGame {
        theme_id,
        user_id: Some(user_id),
        user_phone: None,
    })
    .await
}
