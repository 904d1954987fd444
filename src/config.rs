//! Runtime settings, read from the environment (after `.env`) by the binary.
//! The pipeline itself only ever sees the typed structs below.

use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_SIDECAR_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which sentiment model scores the translated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// In-process English lexicon
    Lexicon,
    /// ML sidecar over HTTP
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    pub api_url: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TRANSLATE_URL.to_string(),
            source_lang: "es".to_string(),
            target_lang: "en".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub translator: TranslatorConfig,
    pub sentiment_backend: SentimentBackend,
    pub sidecar_url: String,
    pub sidecar_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values
    /// fall back to defaults.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str| {
            non_empty(key)
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        };

        let backend_str = non_empty("SENTIMENT_BACKEND").unwrap_or_else(|| "lexicon".to_string());
        let sentiment_backend = match backend_str.to_lowercase().as_str() {
            "remote" | "sidecar" => SentimentBackend::Remote,
            _ => SentimentBackend::Lexicon,
        };

        let defaults = TranslatorConfig::default();
        let translator = TranslatorConfig {
            api_url: non_empty("TRANSLATE_API_URL").unwrap_or(defaults.api_url),
            source_lang: non_empty("TRANSLATE_SOURCE_LANG").unwrap_or(defaults.source_lang),
            target_lang: non_empty("TRANSLATE_TARGET_LANG").unwrap_or(defaults.target_lang),
            timeout: secs("TRANSLATE_TIMEOUT_SECS"),
        };

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            translator,
            sentiment_backend,
            sidecar_url: non_empty("ML_SIDECAR_URL").unwrap_or_else(|| DEFAULT_SIDECAR_URL.to_string()),
            sidecar_timeout: secs("ML_SIDECAR_TIMEOUT_SECS"),
        }
    }
}
