use std::env;

/// AI provider settings, read once at startup.
///
/// Endpoint and key are optional: when either is missing the provider is
/// disabled and every prompt falls back to its deterministic template.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub retries: u32,
}

impl AiConfig {
    pub fn from_env() -> Self {
        let endpoint = non_empty(env::var("AZURE_OPENAI_URL").ok());
        let api_key = non_empty(env::var("AZURE_OPENAI_KEY").ok());
        let timeout_ms = env::var("AI_HTTP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);
        let retries = env::var("AI_HTTP_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        Self {
            endpoint,
            api_key,
            timeout_ms,
            retries,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_disabled_without_endpoint() {
        std::env::remove_var("AZURE_OPENAI_URL");
        std::env::remove_var("AZURE_OPENAI_KEY");
        let cfg = AiConfig::from_env();
        assert!(!cfg.is_enabled());
        assert_eq!(cfg.timeout_ms, 8000);
        assert_eq!(cfg.retries, 2);
    }
}
