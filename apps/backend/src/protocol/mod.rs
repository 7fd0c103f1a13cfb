//! Wire shapes returned to the telephony client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::questions::HintQuestion;
use crate::entities::game_sessions::{GameMode, GameStatus};
use crate::entities::lobby_sessions::{LobbyMode, LobbyStatus};

/// Mode-default allowed digits. Handlers override these when an operation
/// narrows or widens the menu.
pub fn default_allowed_digits(mode: GameMode) -> Vec<u8> {
    match mode {
        GameMode::QuestionSet => vec![0, 1, 2, 3, 4, 9],
        GameMode::HintSelection => vec![0, 1, 2, 3, 4, 9],
        GameMode::GuessInput => vec![9],
        GameMode::GuessConfirm => vec![1, 2, 9],
        GameMode::Ended => vec![1, 2, 3, 9],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub hints_used: i16,
    pub max_hints: i16,
    pub wrong_guesses: i16,
    pub max_guesses: i16,
}

/// One answered question in the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub status: GameStatus,
    pub mode: GameMode,
    pub prompt: String,
    pub allowed_digits: Vec<u8>,
    pub counters: Counters,
    pub summary: Vec<QaEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_set: Option<Vec<HintQuestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// A theme offered on the lobby menu, bound to a digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChoice {
    pub theme_id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lobby_id: Option<String>,
    pub status: LobbyStatus,
    pub mode: LobbyMode,
    pub prompt: String,
    pub allowed_digits: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit_map: Option<BTreeMap<String, ThemeChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ThemeChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub phone: String,
    pub total_score: i64,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub theme_id: String,
    pub top10: Vec<LeaderboardRow>,
    pub me: Option<LeaderboardRow>,
}

/// A game DTMF press can stay in the session, jump to the leaderboard, or
/// hand back to the lobby. Serialized flat so the client sees the shape of
/// whichever machine answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GameOutcome {
    Session(SessionResponse),
    Leaderboard(LeaderboardResponse),
    Lobby(LobbyResponse),
}

/// A lobby DTMF press either stays in the lobby or starts a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LobbyOutcome {
    Lobby(LobbyResponse),
    Session(SessionResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_match_the_menu_contract() {
        assert_eq!(default_allowed_digits(GameMode::QuestionSet), vec![0, 1, 2, 3, 4, 9]);
        assert_eq!(default_allowed_digits(GameMode::GuessInput), vec![9]);
        assert_eq!(default_allowed_digits(GameMode::GuessConfirm), vec![1, 2, 9]);
        assert_eq!(default_allowed_digits(GameMode::Ended), vec![1, 2, 3, 9]);
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let resp = SessionResponse {
            session_id: "s".into(),
            status: GameStatus::Active,
            mode: GameMode::QuestionSet,
            prompt: "p".into(),
            allowed_digits: vec![1, 2, 9],
            counters: Counters {
                hints_used: 0,
                max_hints: 5,
                wrong_guesses: 0,
                max_guesses: 3,
            },
            summary: vec![],
            question_set: None,
            reveal: None,
            result: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("reveal").is_none());
        assert!(json.get("question_set").is_none());
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["mode"], "QUESTION_SET");
    }
}
