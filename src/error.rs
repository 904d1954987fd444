//! Error types for the analysis pipeline.
//!
//! Only `AnalysisError` ever leaves the pipeline. Translation errors are
//! folded into `Translation::Fallback` and per-sentence scoring errors into
//! `SentenceMood::Unscored`.

use thiserror::Error;

/// Failure talking to the translation service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    #[error("translation service unreachable: {0}")]
    Network(String),

    #[error("translation service returned HTTP {0}")]
    Status(u16),

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        TranslationError::Network(e.to_string())
    }
}

/// Failure computing a sentiment score.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("sentiment model unreachable: {0}")]
    Unavailable(String),

    #[error("sentiment model returned HTTP {0}")]
    Status(u16),

    #[error("malformed sentiment response: {0}")]
    MalformedResponse(String),
}

/// Fatal failure of a single `analyze` invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("no text provided")]
    EmptyInput,

    #[error("sentiment scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
