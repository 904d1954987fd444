//! Stand-ins for the translation service and sentiment model used by tests.

use axum::{async_trait, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ScoringError, TranslationError};
use crate::sentiment::{LexiconScorer, Sentiment, SentimentScorer};
use crate::translate::Translator;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Translates whole texts from a fixed dictionary; unknown texts error out.
#[derive(Default)]
pub struct DictTranslator {
    entries: HashMap<String, String>,
    calls: AtomicUsize,
}

impl DictTranslator {
    pub fn with(mut self, source: &str, english: &str) -> Self {
        self.entries.insert(source.to_string(), english.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for DictTranslator {
    fn name(&self) -> &'static str {
        "dict"
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(text)
            .cloned()
            .ok_or_else(|| TranslationError::Network("no entry".to_string()))
    }
}

/// Behaves like an unreachable translation service.
#[derive(Default)]
pub struct FailingTranslator {
    calls: AtomicUsize,
}

impl FailingTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FailingTranslator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn translate(&self, _text: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TranslationError::Network("connection refused".to_string()))
    }
}

/// Lexicon scorer that fails on any text containing `poison`.
pub struct FlakyScorer {
    pub poison: &'static str,
}

#[async_trait]
impl SentimentScorer for FlakyScorer {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn score(&self, text: &str) -> Result<Sentiment, ScoringError> {
        if text.contains(self.poison) {
            return Err(ScoringError::Unavailable("model crashed".to_string()));
        }
        LexiconScorer::new().score(text).await
    }
}
