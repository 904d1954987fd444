//! Source-language → English translation with soft failure.
//!
//! `Translator::translate_to_english` never fails: any transport, status or
//! parse error is logged and turned into `Translation::Fallback` carrying the
//! untouched input text.

use axum::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::TranslatorConfig;
use crate::error::TranslationError;

/// Outcome of a translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    Fallback { text: String, reason: String },
}

impl Translation {
    /// The English text, or the original text on fallback.
    pub fn text(&self) -> &str {
        match self {
            Translation::Translated(text) => text,
            Translation::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(text) => text,
            Translation::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Translation::Fallback { .. })
    }

    pub fn status(&self) -> TranslationStatus {
        match self {
            Translation::Translated(_) => TranslationStatus::Translated,
            Translation::Fallback { .. } => TranslationStatus::Fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    Translated,
    Fallback,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Raw translation call. Errors are expected to be recovered by
    /// `translate_to_english`.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;

    async fn translate_to_english(&self, text: &str) -> Translation {
        if text.trim().is_empty() {
            return Translation::Translated(text.to_string());
        }
        match self.translate(text).await {
            Ok(translated) => Translation::Translated(translated),
            Err(e) => {
                tracing::warn!("⚠️ [Translate] {} failed, using original text: {}", self.name(), e);
                Translation::Fallback {
                    text: text.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Client for the public Google Translate `gtx` endpoint.
///
/// The response is a nested array whose first element lists translated
/// segments: `[[["Hello.", "Hola.", ...], [" World.", " Mundo.", ...]], ...]`.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
        })
    }

    fn request_url(&self, text: &str) -> String {
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.api_url,
            urlencoding::encode(&self.source_lang),
            urlencoding::encode(&self.target_lang),
            urlencoding::encode(text)
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let response = self.client.get(self.request_url(text)).send().await?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        let translated = parse_gtx_response(&body)?;
        tracing::debug!(
            "🌐 [Translate] {} -> {}: {} chars in, {} chars out",
            self.source_lang,
            self.target_lang,
            text.chars().count(),
            translated.chars().count()
        );
        Ok(translated)
    }
}

/// Concatenates the translated segments of a `gtx` response.
pub fn parse_gtx_response(body: &serde_json::Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::MalformedResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(|v| v.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::MalformedResponse(
            "no translated segments".to_string(),
        ));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_mock, FailingTranslator};
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_for(base: &str) -> TranslatorConfig {
        TranslatorConfig {
            api_url: format!("{}/translate_a/single", base),
            timeout: Duration::from_secs(5),
            ..TranslatorConfig::default()
        }
    }

    async fn gtx_mock(Query(params): Query<HashMap<String, String>>) -> Result<Json<serde_json::Value>, StatusCode> {
        if params.get("sl").map(String::as_str) != Some("es")
            || params.get("tl").map(String::as_str) != Some("en")
        {
            return Err(StatusCode::BAD_REQUEST);
        }
        match params.get("q").map(String::as_str) {
            Some("Me encanta este día. El clima es terrible.") => Ok(Json(serde_json::json!([
                [
                    ["I love this day.", "Me encanta este día.", null, null, 10],
                    [" The weather is terrible.", "El clima es terrible.", null, null, 10]
                ],
                null,
                "es"
            ]))),
            Some(_) => Ok(Json(serde_json::json!({ "unexpected": true }))),
            None => Err(StatusCode::BAD_REQUEST),
        }
    }

    #[test]
    fn test_parse_concatenates_segments() {
        let body = serde_json::json!([[["Hello. ", "Hola. "], ["World.", "Mundo."], [null, null, "x"]], null, "es"]);
        assert_eq!(parse_gtx_response(&body).unwrap(), "Hello. World.");
    }

    #[test]
    fn test_parse_rejects_unexpected_shapes() {
        for body in [
            serde_json::json!({}),
            serde_json::json!([]),
            serde_json::json!([null]),
            serde_json::json!([[]]),
        ] {
            assert!(matches!(
                parse_gtx_response(&body),
                Err(TranslationError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_request_url_encodes_text() {
        let translator = GoogleTranslator::new(&config_for("http://localhost")).unwrap();
        let url = translator.request_url("¿Qué tal? a&b");
        assert!(url.starts_with("http://localhost/translate_a/single?client=gtx&sl=es&tl=en&dt=t&q="));
        assert!(url.ends_with("%C2%BFQu%C3%A9%20tal%3F%20a%26b"));
    }

    #[tokio::test]
    async fn test_translates_through_service() {
        let base = spawn_mock(Router::new().route("/translate_a/single", get(gtx_mock))).await;
        let translator = GoogleTranslator::new(&config_for(&base)).unwrap();

        let result = translator
            .translate_to_english("Me encanta este día. El clima es terrible.")
            .await;
        assert_eq!(
            result,
            Translation::Translated("I love this day. The weather is terrible.".to_string())
        );
        assert_eq!(result.status(), TranslationStatus::Translated);
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let base = spawn_mock(Router::new().route("/translate_a/single", get(gtx_mock))).await;
        let translator = GoogleTranslator::new(&config_for(&base)).unwrap();

        let result = translator.translate_to_english("Hola mundo").await;
        assert!(result.is_fallback());
        assert_eq!(result.text(), "Hola mundo");
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let base = spawn_mock(app).await;
        let translator = GoogleTranslator::new(&config_for(&base)).unwrap();

        assert_eq!(
            translator.translate("Hola").await,
            Err(TranslationError::Status(429))
        );
        match translator.translate_to_english("Hola").await {
            Translation::Fallback { text, reason } => {
                assert_eq!(text, "Hola");
                assert!(reason.contains("429"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_returns_exact_input() {
        let translator = GoogleTranslator::new(&config_for("http://127.0.0.1:9")).unwrap();
        let input = "  Hola mundo, ¿cómo estás?\n";
        let result = translator.translate_to_english(input).await;
        assert!(result.is_fallback());
        assert_eq!(result.into_text(), input);
    }

    #[tokio::test]
    async fn test_blank_text_skips_the_service() {
        let translator = FailingTranslator::default();
        assert_eq!(
            translator.translate_to_english("   ").await,
            Translation::Translated("   ".to_string())
        );
        assert_eq!(translator.calls(), 0);
    }
}
