//! The per-user game state machine: start, DTMF dispatch, guess evaluation,
//! scoring and termination.

use std::sync::Arc;

use rand::Rng;
use sea_orm::{ConnectionTrait, Set};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::ai::genie::{self, PromptContext};
use crate::ai::question_texts::get_or_create_question_text;
use crate::ai::TextGenerator;
use crate::domain::guess as matcher;
use crate::domain::questions::{self, HintQuestion, QuestionSource};
use crate::domain::scoring::compute_score;
use crate::entities::game_sessions::{self, GameMode, GameStatus};
use crate::entities::AnswerType;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::protocol::{
    default_allowed_digits, Counters, GameOutcome, QaEntry, Reveal, SessionResponse,
};
use crate::repos;
use crate::services::{leaderboard, lobby, users};

pub const MAX_HINTS: i16 = 5;
pub const MAX_GUESSES: i16 = 3;
pub const MIN_PERSONALITIES: usize = 10;

/// Sessions idle this long are expired lazily on the next interaction.
pub const IDLE_TIMEOUT: Duration = Duration::minutes(10);

/// Guesses scoring below this are wrong outright; at or above (but short of
/// an exact 100) the player is asked to confirm the best candidate.
const CONFIRM_THRESHOLD: u8 = 50;
const EXACT_SCORE: u8 = 100;

const NOT_ACTIVE_PROMPT: &str = "This session is no longer active. \
     Press 1 to start a new game, 3 for theme change, or 9 to exit.";
const TIMEOUT_PROMPT: &str = "Session expired due to inactivity. \
     Press 1 to play again, 2 for leaderboard, 3 for theme change, or 9 to exit.";
const EXIT_PROMPT: &str = "Exited. \
     Press 1 to play again, 2 for leaderboard, 3 for theme change, or 9 to exit.";

/// Start parameters: exactly one of user id (must exist) or phone (upserted).
#[derive(Debug, Clone)]
pub struct StartGame {
    pub theme_id: String,
    pub user_id: Option<String>,
    pub user_phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DebugReveal {
    pub session_id: String,
    pub selected: Option<RevealedPersonality>,
}

#[derive(Debug, Serialize)]
pub struct RevealedPersonality {
    pub id: String,
    pub name: String,
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn is_timed_out(last_activity_at: OffsetDateTime) -> bool {
    now() - last_activity_at >= IDLE_TIMEOUT
}

fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::QuestionSet => "QUESTION_SET",
        GameMode::HintSelection => "HINT_SELECTION",
        GameMode::GuessInput => "GUESS_INPUT",
        GameMode::GuessConfirm => "GUESS_CONFIRM",
        GameMode::Ended => "ENDED",
    }
}

fn json_list<T: DeserializeOwned>(value: &serde_json::Value) -> Vec<T> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::internal(format!("json encode: {e}")))
}

/// Per-response overrides on top of the persisted session row.
#[derive(Default)]
struct Overrides {
    prompt: Option<String>,
    mode: Option<GameMode>,
    allowed_digits: Option<Vec<u8>>,
    question_set: Option<Vec<HintQuestion>>,
    reveal: Option<Reveal>,
    result: Option<String>,
}

fn serialize_session(session: &game_sessions::Model, ov: Overrides) -> SessionResponse {
    let mode = ov.mode.unwrap_or(session.mode);
    SessionResponse {
        session_id: session.id.clone(),
        status: session.status,
        mode,
        prompt: ov.prompt.unwrap_or_else(|| session.prompt.clone()),
        allowed_digits: ov
            .allowed_digits
            .unwrap_or_else(|| default_allowed_digits(mode)),
        counters: Counters {
            hints_used: session.hints_used,
            max_hints: session.max_hints,
            wrong_guesses: session.wrong_guesses,
            max_guesses: session.max_guesses,
        },
        summary: json_list(&session.qa_history),
        question_set: ov.question_set,
        reveal: ov.reveal,
        result: ov.result,
    }
}

async fn theme_name<C: ConnectionTrait>(conn: &C, theme_id: &str) -> Result<String, AppError> {
    Ok(repos::themes::find_by_id(conn, theme_id)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| theme_id.to_string()))
}

async fn reveal_name<C: ConnectionTrait>(
    conn: &C,
    personality_id: &str,
) -> Result<String, AppError> {
    Ok(repos::personalities::find_by_id(conn, personality_id)
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| "Unknown".to_string()))
}

pub async fn list_themes<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<crate::entities::themes::Model>, AppError> {
    Ok(repos::themes::list_by_name(conn).await?)
}

/// Start a new game, superseding any active one for the user.
pub async fn start<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    input: StartGame,
) -> Result<SessionResponse, AppError> {
    let user = match (&input.user_id, &input.user_phone) {
        (Some(id), _) => users::find_user_by_id(conn, id).await?,
        (None, Some(phone)) if !phone.trim().is_empty() => {
            repos::users::upsert_by_phone(conn, phone.trim()).await?
        }
        _ => {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "user_id or user_phone is required",
            ))
        }
    };

    repos::game_sessions::supersede_active(conn, &user.id).await?;

    let personalities = repos::personalities::list_by_theme(conn, &input.theme_id).await?;
    if personalities.len() < MIN_PERSONALITIES {
        return Err(AppError::invalid(
            ErrorCode::ThemeNotPlayable,
            format!(
                "Theme {} must have at least {} personalities (found {})",
                input.theme_id,
                MIN_PERSONALITIES,
                personalities.len()
            ),
        ));
    }

    // ThreadRng is not Send; scope it before the next await
    let picked = {
        let mut rng = rand::rng();
        let idx = rng.random_range(0..personalities.len());
        personalities[idx].id.clone()
    };

    let theme_name = theme_name(conn, &input.theme_id).await?;
    let prompt = genie::frame_response(ai, &PromptContext::Start {
        theme_name: &theme_name,
    })
    .await;

    let ts = now();
    let session = repos::game_sessions::insert(
        conn,
        game_sessions::ActiveModel {
            id: Set(repos::new_id()),
            user_id: Set(user.id.clone()),
            theme_id: Set(input.theme_id.clone()),
            status: Set(GameStatus::Active),
            mode: Set(GameMode::QuestionSet),
            selected_personality_id: Set(picked),
            hints_used: Set(0),
            max_hints: Set(MAX_HINTS),
            wrong_guesses: Set(0),
            max_guesses: Set(MAX_GUESSES),
            used_attr_keys: Set(json!([])),
            pending_question_set: Set(json!([])),
            pending_guess_candidate_id: Set(None),
            qa_history: Set(json!([])),
            prompt: Set(prompt.clone()),
            last_activity_at: Set(ts),
            created_at: Set(ts),
            ended_at: Set(None),
        },
    )
    .await?;

    info!(session_id = %session.id, user_id = %user.id, theme_id = %input.theme_id, "game started");

    Ok(serialize_session(&session, Overrides {
        prompt: Some(prompt),
        allowed_digits: Some(vec![1, 2, 9]),
        ..Default::default()
    }))
}

/// Terminal transition: set status, stamp ended-at, persist a result row
/// for scored statuses.
async fn end_session<C: ConnectionTrait>(
    conn: &C,
    session: game_sessions::Model,
    status: GameStatus,
) -> Result<game_sessions::Model, AppError> {
    let ts = now();
    let mut am: game_sessions::ActiveModel = session.into();
    am.status = Set(status);
    am.mode = Set(GameMode::Ended);
    am.ended_at = Set(Some(ts));
    am.last_activity_at = Set(ts);
    let ended = repos::game_sessions::update(conn, am).await?;

    if status.is_scored() {
        let duration_sec = (ended.ended_at.unwrap_or(ts) - ended.created_at)
            .whole_seconds()
            .clamp(0, i64::from(i32::MAX));
        let score = compute_score(
            ended.status,
            ended.hints_used,
            ended.max_hints,
            ended.wrong_guesses,
            ended.max_guesses,
            duration_sec,
        );
        repos::game_results::upsert_by_session(conn, repos::game_results::NewGameResult {
            session_id: ended.id.clone(),
            user_id: ended.user_id.clone(),
            theme_id: ended.theme_id.clone(),
            status: ended.status,
            score,
            hints_used: ended.hints_used,
            wrong_guesses: ended.wrong_guesses,
            duration_sec: duration_sec as i32,
        })
        .await?;
        info!(session_id = %ended.id, status = ?ended.status, score, "game ended");
    }

    Ok(ended)
}

/// Force exit through the global 9 handler.
async fn exit_session<C: ConnectionTrait>(
    conn: &C,
    session: game_sessions::Model,
    prompt: &str,
) -> Result<SessionResponse, AppError> {
    let ts = now();
    let mut am: game_sessions::ActiveModel = session.into();
    am.status = Set(GameStatus::EndedExit);
    am.mode = Set(GameMode::Ended);
    am.ended_at = Set(Some(ts));
    am.last_activity_at = Set(ts);
    let ended = repos::game_sessions::update(conn, am).await?;
    Ok(serialize_session(&ended, Overrides {
        prompt: Some(prompt.to_string()),
        allowed_digits: Some(vec![1, 2, 3, 9]),
        ..Default::default()
    }))
}

/// Non-active sessions answer with a fixed ended-style response; active
/// ones idle past the timeout expire before any dispatch happens.
async fn check_liveness<C: ConnectionTrait>(
    conn: &C,
    session: &game_sessions::Model,
) -> Result<Option<SessionResponse>, AppError> {
    if session.status != GameStatus::Active && session.mode != GameMode::Ended {
        return Ok(Some(serialize_session(session, Overrides {
            mode: Some(GameMode::Ended),
            prompt: Some(NOT_ACTIVE_PROMPT.to_string()),
            allowed_digits: Some(vec![1, 3, 9]),
            ..Default::default()
        })));
    }
    if session.status == GameStatus::Active && is_timed_out(session.last_activity_at) {
        let ended = end_session(conn, session.clone(), GameStatus::FailedTimeout).await?;
        return Ok(Some(serialize_session(&ended, Overrides {
            prompt: Some(TIMEOUT_PROMPT.to_string()),
            ..Default::default()
        })));
    }
    Ok(None)
}

/// Dispatch a DTMF digit against the session's current mode.
pub async fn input_dtmf<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session_id: &str,
    digit: u8,
) -> Result<GameOutcome, AppError> {
    let session = repos::game_sessions::find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| AppError::invalid(ErrorCode::InvalidSessionId, "Invalid session_id"))?;

    if let Some(resp) = check_liveness(conn, &session).await? {
        return Ok(GameOutcome::Session(resp));
    }

    match session.mode {
        GameMode::GuessInput => handle_guess_input(conn, session, digit)
            .await
            .map(GameOutcome::Session),
        GameMode::Ended => handle_ended(conn, ai, session, digit).await,
        GameMode::GuessConfirm => handle_guess_confirm(conn, ai, session, digit)
            .await
            .map(GameOutcome::Session),
        GameMode::QuestionSet => match digit {
            0 => Ok(GameOutcome::Session(repeat_prompt(&session))),
            9 => exit_session(conn, session, EXIT_PROMPT)
                .await
                .map(GameOutcome::Session),
            1 => offer_hint_batch(conn, ai, session)
                .await
                .map(GameOutcome::Session),
            2 => switch_to_guess(conn, session).await.map(GameOutcome::Session),
            _ => Err(AppError::invalid(
                ErrorCode::DigitNotAllowed,
                format!("DTMF not supported in mode {}", mode_label(GameMode::QuestionSet)),
            )),
        },
        GameMode::HintSelection => match digit {
            0 => Ok(GameOutcome::Session(repeat_prompt(&session))),
            9 => exit_session(conn, session, EXIT_PROMPT)
                .await
                .map(GameOutcome::Session),
            d => answer_hint(conn, ai, session, d)
                .await
                .map(GameOutcome::Session),
        },
    }
}

fn repeat_prompt(session: &game_sessions::Model) -> SessionResponse {
    match session.mode {
        GameMode::QuestionSet => serialize_session(session, Overrides {
            prompt: Some("Choose a question:".to_string()),
            question_set: Some(json_list(&session.pending_question_set)),
            ..Default::default()
        }),
        _ => serialize_session(session, Overrides {
            prompt: Some(
                "Press 1 for the next set of questions. Press 2 to guess. \
                 Press 0 to repeat. Press 9 to exit."
                    .to_string(),
            ),
            ..Default::default()
        }),
    }
}

async fn handle_guess_input<C: ConnectionTrait>(
    conn: &C,
    session: game_sessions::Model,
    digit: u8,
) -> Result<SessionResponse, AppError> {
    match digit {
        9 => exit_session(conn, session, EXIT_PROMPT).await,
        _ => Err(AppError::invalid(
            ErrorCode::DigitNotAllowed,
            "Invalid digit for GUESS_INPUT",
        )),
    }
}

async fn handle_ended<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
    digit: u8,
) -> Result<GameOutcome, AppError> {
    match digit {
        1 => start(conn, ai, StartGame {
            theme_id: session.theme_id,
            user_id: Some(session.user_id),
            user_phone: None,
        })
        .await
        .map(GameOutcome::Session),
        2 => leaderboard::theme_leaderboard(conn, &session.theme_id, &session.user_id)
            .await
            .map(GameOutcome::Leaderboard),
        3 => lobby::menu(conn, &session.user_id)
            .await
            .map(GameOutcome::Lobby),
        9 => Ok(GameOutcome::Session(serialize_session(
            &session,
            Overrides {
                prompt: Some("Exited.".to_string()),
                ..Default::default()
            },
        ))),
        0 => Ok(GameOutcome::Session(serialize_session(
            &session,
            Overrides {
                prompt: Some(
                    "Press 1 to play again. Press 2 for leaderboard. \
                     Press 3 for theme change. Press 9 to exit."
                        .to_string(),
                ),
                ..Default::default()
            },
        ))),
        _ => Err(AppError::invalid(
            ErrorCode::DigitNotAllowed,
            "Invalid digit for ENDED menu",
        )),
    }
}

async fn handle_guess_confirm<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
    digit: u8,
) -> Result<SessionResponse, AppError> {
    match digit {
        1 => {
            let candidate = session.pending_guess_candidate_id.clone();
            evaluate_guess(conn, ai, session, candidate).await
        }
        2 => {
            let mut am: game_sessions::ActiveModel = session.into();
            am.pending_guess_candidate_id = Set(None);
            am.mode = Set(GameMode::GuessInput);
            am.last_activity_at = Set(now());
            let updated = repos::game_sessions::update(conn, am).await?;
            Ok(serialize_session(&updated, Overrides {
                prompt: Some("Okay. Type your guess again.".to_string()),
                ..Default::default()
            }))
        }
        9 => exit_session(conn, session, "Exited.").await,
        0 => Ok(serialize_session(&session, Overrides {
            prompt: Some(
                "Did you mean the suggested personality? Press 1 for Yes, 2 for No.".to_string(),
            ),
            ..Default::default()
        })),
        _ => Err(AppError::invalid(
            ErrorCode::DigitNotAllowed,
            "Invalid digit for GUESS_CONFIRM",
        )),
    }
}

/// QUESTION_SET digit 1: offer up to four unused attribute questions.
async fn offer_hint_batch<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
) -> Result<SessionResponse, AppError> {
    let used: Vec<String> = json_list(&session.used_attr_keys);
    let configs =
        repos::theme_attribute_configs::list_available(conn, &session.theme_id, &used).await?;
    let sources: Vec<QuestionSource> = configs
        .iter()
        .map(|c| QuestionSource {
            attr_key: c.key.clone(),
            answer_type: c.answer_type,
        })
        .collect();

    let mut set = {
        let mut rng = rand::rng();
        questions::build_question_set(&sources, &mut rng)
    };

    if set.is_empty() {
        return Ok(serialize_session(&session, Overrides {
            prompt: Some(
                "I'm out of hints! You'll have to guess now. Press 2 to guess.".to_string(),
            ),
            allowed_digits: Some(vec![2, 9]),
            ..Default::default()
        }));
    }

    let theme_name = theme_name(conn, &session.theme_id).await?;
    for q in &mut set {
        q.text = get_or_create_question_text(
            conn,
            ai,
            &session.theme_id,
            &theme_name,
            &q.attr_key,
            q.answer_type,
            &q.text,
        )
        .await?;
    }

    let options: Vec<(u8, String)> = set.iter().map(|q| (q.dtmf, q.text.clone())).collect();
    let prompt = genie::frame_options(ai, &theme_name, &options).await;
    let allowed: Vec<u8> = set.iter().map(|q| q.dtmf).chain([9]).collect();

    let mut am: game_sessions::ActiveModel = session.into();
    am.pending_question_set = Set(to_json(&set)?);
    am.mode = Set(GameMode::HintSelection);
    am.last_activity_at = Set(now());
    am.prompt = Set(prompt.clone());
    let updated = repos::game_sessions::update(conn, am).await?;

    Ok(serialize_session(&updated, Overrides {
        prompt: Some(prompt),
        question_set: Some(set),
        allowed_digits: Some(allowed),
        ..Default::default()
    }))
}

/// QUESTION_SET digit 2: invite a free-text guess.
async fn switch_to_guess<C: ConnectionTrait>(
    conn: &C,
    session: game_sessions::Model,
) -> Result<SessionResponse, AppError> {
    let mut am: game_sessions::ActiveModel = session.into();
    am.mode = Set(GameMode::GuessInput);
    am.last_activity_at = Set(now());
    let updated = repos::game_sessions::update(conn, am).await?;
    Ok(serialize_session(&updated, Overrides {
        prompt: Some("I'm listening! Who is the hidden personality?".to_string()),
        ..Default::default()
    }))
}

/// HINT_SELECTION: the digit must match one of the offered slots.
async fn answer_hint<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
    digit: u8,
) -> Result<SessionResponse, AppError> {
    let set: Vec<HintQuestion> = json_list(&session.pending_question_set);
    let Some(chosen) = set.iter().find(|q| q.dtmf == digit).cloned() else {
        return Err(AppError::invalid(
            ErrorCode::DigitNotAllowed,
            format!("DTMF not supported in mode {}", mode_label(GameMode::HintSelection)),
        ));
    };

    let attr = repos::personality_attributes::find_value(
        conn,
        &session.selected_personality_id,
        &chosen.attr_key,
    )
    .await?;
    let answer = match attr {
        Some(a) => match a.answer_type {
            AnswerType::YesNo => {
                if a.value == "YES" {
                    "Yes.".to_string()
                } else {
                    "No.".to_string()
                }
            }
            AnswerType::Value => format!("{}.", a.value),
        },
        None => "Unknown.".to_string(),
    };

    let mut history: Vec<QaEntry> = json_list(&session.qa_history);
    history.push(QaEntry {
        question: chosen.text.clone(),
        answer: answer.clone(),
    });
    let mut used: Vec<String> = json_list(&session.used_attr_keys);
    if !used.contains(&chosen.attr_key) {
        used.push(chosen.attr_key.clone());
    }

    let prompt = genie::frame_response(ai, &PromptContext::Hint {
        hint_text: &chosen.text,
        answer: &answer,
    })
    .await;

    let hints_used = session.hints_used + 1;
    let mut am: game_sessions::ActiveModel = session.into();
    am.hints_used = Set(hints_used);
    am.used_attr_keys = Set(to_json(&used)?);
    am.qa_history = Set(to_json(&history)?);
    am.mode = Set(GameMode::QuestionSet);
    am.pending_question_set = Set(json!([]));
    am.last_activity_at = Set(now());
    am.prompt = Set(prompt.clone());
    let updated = repos::game_sessions::update(conn, am).await?;

    if updated.hints_used >= updated.max_hints {
        let mut am: game_sessions::ActiveModel = updated.into();
        am.mode = Set(GameMode::GuessInput);
        am.last_activity_at = Set(now());
        let switched = repos::game_sessions::update(conn, am).await?;
        return Ok(serialize_session(&switched, Overrides {
            prompt: Some("Hints exhausted! Time to guess. Type your guess now.".to_string()),
            ..Default::default()
        }));
    }

    Ok(serialize_session(&updated, Overrides {
        prompt: Some(prompt),
        allowed_digits: Some(vec![1, 2, 9]),
        ..Default::default()
    }))
}

/// Submit a free-text guess. Legal only in GUESS_INPUT mode.
pub async fn guess<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session_id: &str,
    text: &str,
) -> Result<SessionResponse, AppError> {
    let session = repos::game_sessions::find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| AppError::invalid(ErrorCode::InvalidSessionId, "Invalid session_id"))?;

    if let Some(resp) = check_liveness(conn, &session).await? {
        return Ok(resp);
    }

    if session.mode != GameMode::GuessInput {
        return Err(AppError::invalid(
            ErrorCode::ModeViolation,
            format!("Guess not allowed in mode {}", mode_label(session.mode)),
        ));
    }

    let input = matcher::normalize(text);
    if input.is_empty() {
        return Ok(serialize_session(&session, Overrides {
            prompt: Some("Empty guess. Type the personality's name.".to_string()),
            ..Default::default()
        }));
    }

    let people = repos::personalities::list_with_aliases(conn, &session.theme_id).await?;
    let mut best: Option<matcher::Match> = None;
    for (p, aliases) in &people {
        let mut top = matcher::score_guess(&input, &p.name);
        for alias in aliases {
            top = top.max(matcher::score_guess(&input, &alias.alias));
        }
        if best.as_ref().is_none_or(|b| top > b.score) {
            best = Some(matcher::Match {
                id: p.id.clone(),
                name: p.name.clone(),
                score: top,
            });
        }
    }

    let Some(best) = best.filter(|b| b.score >= CONFIRM_THRESHOLD) else {
        return wrong_guess(conn, ai, session).await;
    };

    if best.score == EXACT_SCORE {
        return evaluate_guess(conn, ai, session, Some(best.id)).await;
    }

    let mut am: game_sessions::ActiveModel = session.into();
    am.pending_guess_candidate_id = Set(Some(best.id));
    am.mode = Set(GameMode::GuessConfirm);
    am.last_activity_at = Set(now());
    let updated = repos::game_sessions::update(conn, am).await?;
    Ok(serialize_session(&updated, Overrides {
        prompt: Some(format!(
            "Did you mean {}? Press 1 for Yes, 2 for No.",
            best.name
        )),
        ..Default::default()
    }))
}

async fn evaluate_guess<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
    candidate_id: Option<String>,
) -> Result<SessionResponse, AppError> {
    let selected = session.selected_personality_id.clone();
    let is_correct = candidate_id.as_deref() == Some(selected.as_str());

    if !is_correct {
        return wrong_guess(conn, ai, session).await;
    }

    let ended = end_session(conn, session, GameStatus::Won).await?;
    let prompt = genie::frame_response(ai, &PromptContext::Win {
        personality_name: None,
    })
    .await;
    let mut am: game_sessions::ActiveModel = ended.into();
    am.prompt = Set(prompt.clone());
    let updated = repos::game_sessions::update(conn, am).await?;

    let name = reveal_name(conn, &selected).await?;
    Ok(serialize_session(&updated, Overrides {
        prompt: Some(prompt),
        reveal: Some(Reveal { name }),
        ..Default::default()
    }))
}

async fn wrong_guess<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    session: game_sessions::Model,
) -> Result<SessionResponse, AppError> {
    let selected = session.selected_personality_id.clone();
    let wrong_guesses = session.wrong_guesses + 1;
    let new_mode = if session.hints_used >= session.max_hints {
        GameMode::GuessInput
    } else {
        GameMode::QuestionSet
    };

    let mut am: game_sessions::ActiveModel = session.into();
    am.wrong_guesses = Set(wrong_guesses);
    am.pending_guess_candidate_id = Set(None);
    am.mode = Set(new_mode);
    am.last_activity_at = Set(now());
    let updated = repos::game_sessions::update(conn, am).await?;

    let personality_name = reveal_name(conn, &selected).await?;

    if updated.wrong_guesses >= updated.max_guesses {
        let ended = end_session(conn, updated, GameStatus::FailedGuesses).await?;
        let prompt = genie::frame_response(ai, &PromptContext::Loss {
            personality_name: Some(&personality_name),
        })
        .await;
        let mut am: game_sessions::ActiveModel = ended.into();
        am.prompt = Set(prompt.clone());
        let final_session = repos::game_sessions::update(conn, am).await?;
        return Ok(serialize_session(&final_session, Overrides {
            prompt: Some(prompt),
            reveal: Some(Reveal {
                name: personality_name,
            }),
            ..Default::default()
        }));
    }

    let remaining = updated.max_guesses - updated.wrong_guesses;
    let ctx = if updated.mode == GameMode::GuessInput {
        PromptContext::WrongGuessNoHints {
            remaining_guesses: remaining,
        }
    } else {
        PromptContext::WrongGuess
    };
    let prompt = genie::frame_response(ai, &ctx).await;
    let allowed = if updated.mode == GameMode::QuestionSet {
        vec![1, 2, 9]
    } else {
        vec![9]
    };

    let mut am: game_sessions::ActiveModel = updated.into();
    am.prompt = Set(prompt.clone());
    let final_session = repos::game_sessions::update(conn, am).await?;
    Ok(serialize_session(&final_session, Overrides {
        prompt: Some(prompt),
        result: Some("INCORRECT".to_string()),
        allowed_digits: Some(allowed),
        ..Default::default()
    }))
}

/// Operator escape hatch: expose the hidden personality without touching
/// session state.
pub async fn debug_reveal<C: ConnectionTrait>(
    conn: &C,
    session_id: &str,
) -> Result<DebugReveal, AppError> {
    let session = repos::game_sessions::find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| AppError::invalid(ErrorCode::InvalidSessionId, "Invalid session_id"))?;
    let selected = repos::personalities::find_by_id(conn, &session.selected_personality_id)
        .await?
        .map(|p| RevealedPersonality {
            id: p.id,
            name: p.name,
        });
    Ok(DebugReveal {
        session_id: session.id,
        selected,
    })
}
