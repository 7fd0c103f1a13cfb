//! Question-set assembly: picks a randomized batch of not-yet-used
//! attribute questions and assigns them DTMF digits.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::AnswerType;

/// How many hint questions are offered per batch.
pub const QUESTION_SET_SIZE: usize = 4;

/// An attribute available for questioning, already filtered to enabled and
/// not-yet-used, ordered by ascending strength.
#[derive(Debug, Clone)]
pub struct QuestionSource {
    pub attr_key: String,
    pub answer_type: AnswerType,
}

/// One offered hint slot, persisted on the session while the player picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintQuestion {
    pub dtmf: u8,
    pub attr_key: String,
    pub text: String,
    pub answer_type: AnswerType,
}

/// Deterministic question phrasing for an attribute. Used verbatim whenever
/// AI generation is unavailable or fails.
pub fn default_template(attr_key: &str, answer_type: AnswerType) -> String {
    match answer_type {
        AnswerType::Value => match attr_key {
            "sport" => "Which sport are they associated with?".to_string(),
            _ => format!("What is the value of {attr_key}?"),
        },
        AnswerType::YesNo => match attr_key {
            "gender" => "Is the personality male?".to_string(),
            "region" => "Is the personality from Asia?".to_string(),
            "active_status" => "Are they currently active?".to_string(),
            "award_level" => "Have they won international-level awards?".to_string(),
            "bollywood" => "Is this personality associated with Bollywood?".to_string(),
            "hollywood" => "Is this personality associated with Hollywood?".to_string(),
            "oscar_winner" => "Have they won an Oscar?".to_string(),
            "scientist" => "Is this person a scientist?".to_string(),
            "royalty" => "Is this person from a royal family?".to_string(),
            "political_leader" => "Are they a political leader?".to_string(),
            _ => format!("Is the {attr_key} attribute true?"),
        },
    }
}

/// Shuffle the available sources, keep the first [`QUESTION_SET_SIZE`] and
/// assign digits 1..=N by position. Texts start out as the default template;
/// callers may overwrite them with generated phrasing.
pub fn build_question_set<R: Rng>(sources: &[QuestionSource], rng: &mut R) -> Vec<HintQuestion> {
    let mut pool: Vec<&QuestionSource> = sources.iter().collect();
    pool.shuffle(rng);
    pool.truncate(QUESTION_SET_SIZE);
    pool.iter()
        .enumerate()
        .map(|(idx, src)| HintQuestion {
            dtmf: (idx + 1) as u8,
            attr_key: src.attr_key.clone(),
            text: default_template(&src.attr_key, src.answer_type),
            answer_type: src.answer_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn sources(keys: &[&str]) -> Vec<QuestionSource> {
        keys.iter()
            .map(|k| QuestionSource {
                attr_key: (*k).to_string(),
                answer_type: AnswerType::YesNo,
            })
            .collect()
    }

    #[test]
    fn templates_cover_known_keys_and_fall_back() {
        assert_eq!(
            default_template("sport", AnswerType::Value),
            "Which sport are they associated with?"
        );
        assert_eq!(
            default_template("height_category", AnswerType::Value),
            "What is the value of height_category?"
        );
        assert_eq!(
            default_template("gender", AnswerType::YesNo),
            "Is the personality male?"
        );
        assert_eq!(
            default_template("world_record", AnswerType::YesNo),
            "Is the world_record attribute true?"
        );
    }

    #[test]
    fn batch_is_capped_at_four_with_sequential_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let set = build_question_set(&sources(&["a", "b", "c", "d", "e", "f"]), &mut rng);
        assert_eq!(set.len(), 4);
        let digits: Vec<u8> = set.iter().map(|q| q.dtmf).collect();
        assert_eq!(digits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn batch_smaller_than_four_keeps_all_sources() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let set = build_question_set(&sources(&["a", "b"]), &mut rng);
        assert_eq!(set.len(), 2);
        let mut keys: Vec<&str> = set.iter().map(|q| q.attr_key.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_sources_yield_empty_batch() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(build_question_set(&[], &mut rng).is_empty());
    }

    #[test]
    fn shuffle_is_deterministic_under_a_seeded_rng() {
        let src = sources(&["a", "b", "c", "d", "e"]);
        let mut r1 = ChaCha8Rng::seed_from_u64(42);
        let mut r2 = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(build_question_set(&src, &mut r1), build_question_set(&src, &mut r2));
    }
}
