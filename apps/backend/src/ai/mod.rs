//! Text generation collaborator. Gameplay never depends on it succeeding:
//! every caller supplies a deterministic fallback.

pub mod genie;
pub mod http;
pub mod question_texts;

use async_trait::async_trait;

/// A single generation request. Temperature and token limits vary per use.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum TextGenError {
    #[error("text generation is disabled")]
    Disabled,
    #[error("http error: {0}")]
    Http(String),
    #[error("bad response: {0}")]
    BadResponse(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, req: GenerateRequest<'_>) -> Result<String, TextGenError>;
}

/// No-op generator used when no endpoint is configured. Callers fall back
/// to their deterministic templates.
#[derive(Debug, Default)]
pub struct Disabled;

#[async_trait]
impl TextGenerator for Disabled {
    async fn generate(&self, _req: GenerateRequest<'_>) -> Result<String, TextGenError> {
        Err(TextGenError::Disabled)
    }
}
