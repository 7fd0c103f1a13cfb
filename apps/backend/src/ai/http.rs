//! Azure OpenAI chat-completions client with a bounded retry loop.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{GenerateRequest, TextGenError, TextGenerator};
use crate::config::ai::AiConfig;

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a game host. Keep responses short, clear, and suitable for a phone call.";

pub struct AzureOpenAi {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    retries: u32,
}

impl AzureOpenAi {
    /// Build a client from config. Returns `None` when no endpoint or key
    /// is configured, in which case callers should use [`super::Disabled`].
    pub fn from_config(cfg: &AiConfig) -> Option<Self> {
        let endpoint = cfg.endpoint.clone()?;
        let api_key = cfg.api_key.clone()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .ok()?;
        Some(Self {
            client,
            endpoint,
            api_key,
            retries: cfg.retries,
        })
    }

    async fn call_once(&self, req: &GenerateRequest<'_>) -> Result<String, TextGenError> {
        let body = json!({
            "messages": [
                {"role": "system", "content": req.system.unwrap_or(DEFAULT_SYSTEM_PROMPT)},
                {"role": "user", "content": req.prompt},
            ],
            "max_tokens": req.max_tokens,
            "temperature": req.temperature,
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TextGenError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TextGenError::Http(format!("status {status}")));
        }

        #[derive(Deserialize)]
        struct ChatMessage {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| TextGenError::BadResponse(e.to_string()))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(TextGenError::BadResponse("empty completion".into()));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for AzureOpenAi {
    async fn generate(&self, req: GenerateRequest<'_>) -> Result<String, TextGenError> {
        let mut last_err = TextGenError::Http("no attempts made".into());
        for attempt in 0..=self.retries {
            match self.call_once(&req).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    // 4xx-class responses do not improve on retry
                    let retryable = match &err {
                        TextGenError::Http(msg) if msg.starts_with("status 4") => false,
                        TextGenError::Disabled => false,
                        _ => true,
                    };
                    warn!(attempt, error = %err, "text generation attempt failed");
                    last_err = err;
                    if !retryable || attempt == self.retries {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(150 * u64::from(attempt + 1))).await;
                }
            }
        }
        Err(last_err)
    }
}
