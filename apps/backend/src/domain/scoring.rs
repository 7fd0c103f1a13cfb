//! Final score computation for completed games.

use crate::entities::game_sessions::GameStatus;

pub const BASE_SCORE: i32 = 1000;
pub const HINT_BONUS: i32 = 50;
pub const GUESS_BONUS: i32 = 30;

/// Score a finished game. Only wins score; every other terminal status is 0.
///
/// `score = 1000 + unusedHints*50 + unusedGuesses*30 - floor(durationSec / 2)`
pub fn compute_score(
    status: GameStatus,
    hints_used: i16,
    max_hints: i16,
    wrong_guesses: i16,
    max_guesses: i16,
    duration_sec: i64,
) -> i32 {
    if status != GameStatus::Won {
        return 0;
    }
    let hint_bonus = i32::from((max_hints - hints_used).max(0)) * HINT_BONUS;
    let guess_bonus = i32::from((max_guesses - wrong_guesses).max(0)) * GUESS_BONUS;
    let time_penalty = (duration_sec.max(0) / 2) as i32;
    BASE_SCORE + hint_bonus + guess_bonus - time_penalty
}
