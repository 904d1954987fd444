//! Text analysis service: translates input to English, then reports
//! sentiment, subjectivity, keyword frequency and per-sentence mood.

pub mod api;
pub mod config;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod segment;
pub mod sentiment;
pub mod stopwords;
pub mod translate;
pub mod typing;

#[cfg(test)]
mod testing;

pub use error::{AnalysisError, ScoringError, TranslationError};
pub use pipeline::{AnalysisResult, TextAnalysisPipeline};
