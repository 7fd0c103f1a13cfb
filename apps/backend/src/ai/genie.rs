//! Prompt framing. Deterministic base texts are the contract; the generator
//! may paraphrase them but every failure falls back to the base silently.

use std::sync::Arc;

use tracing::debug;

use super::{GenerateRequest, TextGenerator};

const FRAME_MAX_TOKENS: u32 = 150;
const FRAME_TEMPERATURE: f32 = 0.3;

/// Terminal menu tail shared by win/loss/timeout-style prompts.
const PLAY_AGAIN_TAIL: &str =
    "Press 1 to play again, 2 for leaderboard, 3 for theme change, or 9 to exit.";

/// Game moments the provider can paraphrase.
#[derive(Debug, Clone)]
pub enum PromptContext<'a> {
    Start {
        theme_name: &'a str,
    },
    Hint {
        hint_text: &'a str,
        answer: &'a str,
    },
    WrongGuess,
    WrongGuessNoHints {
        remaining_guesses: i16,
    },
    Win {
        personality_name: Option<&'a str>,
    },
    Loss {
        personality_name: Option<&'a str>,
    },
}

/// The deterministic template for a context. Returned verbatim when
/// generation is disabled or fails.
pub fn base_prompt(ctx: &PromptContext<'_>) -> String {
    match ctx {
        PromptContext::Start { theme_name } => format!(
            "I picked a personality from \"{theme_name}\". Press 1 for a hint or press 2 to guess."
        ),
        PromptContext::Hint { hint_text, answer } => format!(
            "Hint: {hint_text} Answer: {answer} Press 1 for another hint or press 2 to guess."
        ),
        PromptContext::WrongGuess => {
            "That guess is not correct. Press 1 for a hint or press 2 to guess again.".to_string()
        }
        PromptContext::WrongGuessNoHints { remaining_guesses } => format!(
            "That guess is not correct. No hints are left. Type your next guess. \
             You have {remaining_guesses} attempts left. Press 9 to exit."
        ),
        PromptContext::Win { personality_name } => {
            let name = personality_name.unwrap_or("the personality");
            format!("Correct. The answer is {name}. {PLAY_AGAIN_TAIL}")
        }
        PromptContext::Loss { personality_name } => {
            let name = personality_name.unwrap_or("the personality");
            format!("No attempts left. The answer is {name}. {PLAY_AGAIN_TAIL}")
        }
    }
}

/// Collapse runs of whitespace so generated text reads cleanly over voice.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Paraphrase the base prompt for a context. Falls back to the base text on
/// any generation failure.
pub async fn frame_response(ai: &Arc<dyn TextGenerator>, ctx: &PromptContext<'_>) -> String {
    let base = base_prompt(ctx);
    let instruction = format!(
        "Rewrite this game message in a friendly, natural voice. Keep every \
         digit instruction exactly as written and do not add new options: {base}"
    );
    // Hints must never leak the hidden name
    let system = match ctx {
        PromptContext::Hint { .. } => Some(
            "You are a game host. Never mention any personality by name; \
             refer only to \"the personality\".",
        ),
        _ => None,
    };

    match ai
        .generate(GenerateRequest {
            system,
            prompt: &instruction,
            max_tokens: FRAME_MAX_TOKENS,
            temperature: FRAME_TEMPERATURE,
        })
        .await
    {
        Ok(text) if !clean_text(&text).is_empty() => clean_text(&text),
        Ok(_) => base,
        Err(err) => {
            debug!(error = %err, "prompt framing fell back to base text");
            base
        }
    }
}

/// Combine offered hint options into one prompt. Falls back to a plain
/// enumeration on generation failure.
pub async fn frame_options(
    ai: &Arc<dyn TextGenerator>,
    theme_name: &str,
    options: &[(u8, String)],
) -> String {
    let listed = options
        .iter()
        .map(|(digit, text)| format!("Press {digit} for {text}"))
        .collect::<Vec<_>>()
        .join(" ");
    let base = format!("Choose a hint about this personality from \"{theme_name}\". {listed}");

    let instruction = format!(
        "Rewrite this hint menu in a friendly voice, keeping every digit \
         mapped to the same question: {base}"
    );
    match ai
        .generate(GenerateRequest {
            system: None,
            prompt: &instruction,
            max_tokens: FRAME_MAX_TOKENS,
            temperature: FRAME_TEMPERATURE,
        })
        .await
    {
        Ok(text) if !clean_text(&text).is_empty() => clean_text(&text),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Disabled;

    #[test]
    fn base_prompts_keep_digit_instructions() {
        let start = base_prompt(&PromptContext::Start { theme_name: "Sports" });
        assert!(start.contains("Press 1 for a hint or press 2 to guess."));
        assert!(start.contains("\"Sports\""));

        let win = base_prompt(&PromptContext::Win {
            personality_name: None,
        });
        assert!(win.contains("the personality"));
        assert!(win.contains("Press 1 to play again"));

        let loss = base_prompt(&PromptContext::Loss {
            personality_name: Some("Virat Kohli"),
        });
        assert!(loss.contains("Virat Kohli"));
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a \n b\t c "), "a b c");
    }

    #[tokio::test]
    async fn disabled_generator_falls_back_to_base() {
        let ai: Arc<dyn TextGenerator> = Arc::new(Disabled);
        let got = frame_response(&ai, &PromptContext::WrongGuess).await;
        assert_eq!(
            got,
            "That guess is not correct. Press 1 for a hint or press 2 to guess again."
        );
    }

    #[tokio::test]
    async fn options_fall_back_to_plain_enumeration() {
        let ai: Arc<dyn TextGenerator> = Arc::new(Disabled);
        let got = frame_options(
            &ai,
            "Sports",
            &[(1, "Is the personality male?".into()), (2, "Which sport?".into())],
        )
        .await;
        assert!(got.starts_with("Choose a hint about this personality from \"Sports\"."));
        assert!(got.contains("Press 1 for Is the personality male?"));
        assert!(got.contains("Press 2 for Which sport?"));
    }
}
