//! Cached AI phrasing for hint questions. One text per
//! (theme, attribute, answer type); generated once, reused by every session.

use std::sync::Arc;

use lazy_regex::regex;
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use tracing::debug;

use super::{GenerateRequest, TextGenerator};
use crate::entities::AnswerType;
use crate::errors::domain::DomainError;
use crate::repos::question_texts as repo;

const QUESTION_MAX_TOKENS: u32 = 200;
const QUESTION_TEMPERATURE: f32 = 0.7;

#[derive(Deserialize)]
struct GeneratedQuestion {
    text: String,
}

fn build_prompt(theme_name: &str, attr_key: &str, answer_type: AnswerType, fallback: &str) -> String {
    let kind = match answer_type {
        AnswerType::YesNo => "a yes/no question",
        AnswerType::Value => "a short open question",
    };
    [
        format!(
            "Write {kind} about the \"{attr_key}\" attribute of a hidden personality \
             from the theme \"{theme_name}\"."
        ),
        format!("A plain default phrasing is: {fallback}"),
        "Keep it under 15 words and suitable for a phone call.".to_string(),
        "Return ONLY valid JSON: {\"text\":\"...\"}".to_string(),
    ]
    .join("\n")
}

/// Parse the model output, tolerating prose around the JSON object.
fn parse_generated(raw: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<GeneratedQuestion>(raw) {
        return Some(parsed.text);
    }
    let captured = regex!(r"\{[\s\S]*\}").find(raw)?;
    serde_json::from_str::<GeneratedQuestion>(captured.as_str())
        .ok()
        .map(|g| g.text)
}

/// Look up the cached phrasing, generating and persisting it on a miss.
/// Any generation or parse failure yields the fallback, uncached.
pub async fn get_or_create_question_text<C: ConnectionTrait>(
    conn: &C,
    ai: &Arc<dyn TextGenerator>,
    theme_id: &str,
    theme_name: &str,
    attr_key: &str,
    answer_type: AnswerType,
    fallback: &str,
) -> Result<String, DomainError> {
    if let Some(cached) = repo::find_text(conn, theme_id, attr_key, answer_type).await? {
        return Ok(cached.text);
    }

    let prompt = build_prompt(theme_name, attr_key, answer_type, fallback);
    let generated = match ai
        .generate(GenerateRequest {
            system: None,
            prompt: &prompt,
            max_tokens: QUESTION_MAX_TOKENS,
            temperature: QUESTION_TEMPERATURE,
        })
        .await
    {
        Ok(raw) => parse_generated(&raw),
        Err(err) => {
            debug!(error = %err, attr_key, "question generation failed, using fallback");
            None
        }
    };

    let Some(text) = generated.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) else {
        return Ok(fallback.to_string());
    };

    // Another request may insert the same key concurrently; first write wins.
    let stored = repo::insert_or_get(conn, theme_id, attr_key, answer_type, &text).await?;
    Ok(stored.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json() {
        assert_eq!(
            parse_generated(r#"{"text":"Is this person male?"}"#).as_deref(),
            Some("Is this person male?")
        );
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let raw = "Sure! Here you go:\n{\"text\":\"Which sport do they play?\"}\nHope that helps.";
        assert_eq!(parse_generated(raw).as_deref(), Some("Which sport do they play?"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_generated("not json at all").is_none());
        assert!(parse_generated("{broken").is_none());
    }
}
