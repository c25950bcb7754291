use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const API_URL_ENV: &str = "LM_STUDIO_API_URL";
pub const MODEL_ENV: &str = "LM_STUDIO_MODEL";

pub const DEFAULT_API_URL: &str = "http://localhost:1234/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "local-model";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Timeout for the greeting request of the connection check.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for grading requests.
pub const GRADING_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();
        if let Some(url) = get(API_URL_ENV) {
            config.api_url = url;
        }
        if let Some(model) = get(MODEL_ENV) {
            config.model = model;
        }
        config
    }

    /// Applies a stored `setup.llm` section. Unknown or ill-typed keys are ignored.
    pub fn with_overrides(mut self, section: &Map<String, Value>) -> Self {
        if let Some(url) = section
            .get("apiUrl")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            self.api_url = url.to_string();
        }
        if let Some(model) = section
            .get("model")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            self.model = model.to_string();
        }
        if let Some(t) = section.get("temperature").and_then(|v| v.as_f64()) {
            self.temperature = t;
        }
        if let Some(n) = section
            .get("maxTokens")
            .and_then(|v| v.as_u64())
            .filter(|n| *n > 0)
        {
            self.max_tokens = u32::try_from(n).unwrap_or(u32::MAX);
        }
        self
    }

    pub fn with_cli_overrides(mut self, url: Option<String>, model: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_url = url;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}
