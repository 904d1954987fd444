//! Text analysis pipeline.
//!
//! `analyze` runs, in order:
//! 1. translate the raw text to English (falls back to the raw text)
//! 2. score polarity/subjectivity on the English text (fatal on failure)
//! 3. segment original and English text and pair sentences by position
//! 4. count keywords on the English text
//! 5. assemble the `AnalysisResult`

use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{AppConfig, SentimentBackend};
use crate::error::AnalysisError;
use crate::frequency::{count_words, WordCount, WordFrequencyTable};
use crate::segment::{pair_sentences, segment, SentencePair};
use crate::sentiment::{LexiconScorer, RemoteScorer, SentenceMood, Sentiment, SentimentScorer};
use crate::translate::{GoogleTranslator, TranslationStatus, Translator};

/// How many sentence pairs (and their moods) are surfaced to the caller.
pub const MAX_SURFACED_SENTENCES: usize = 10;
/// How many words the frequency chart shows.
pub const TOP_WORDS: usize = 10;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisResult {
    #[schema(example = "4f0c3c1e-8d0c-4a43-9a55-0c6b3a0d8f1e")]
    pub id: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentence_pairs: Vec<SentencePair>,
    #[schema(value_type = Vec<WordCount>)]
    pub word_frequencies: WordFrequencyTable,
    pub filtered_words: Vec<String>,
    pub original_text: String,
    pub translated_text: String,
    pub translation: TranslationStatus,
}

impl AnalysisResult {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::new(self.polarity, self.subjectivity)
    }

    pub fn top_sentence_pairs(&self) -> &[SentencePair] {
        let n = self.sentence_pairs.len().min(MAX_SURFACED_SENTENCES);
        &self.sentence_pairs[..n]
    }

    pub fn top_words(&self) -> &[WordCount] {
        self.word_frequencies.top(TOP_WORDS)
    }
}

/// A sentence pair tagged with the mood of its translated sentence.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SentenceSentiment {
    pub original: String,
    pub translated: String,
    /// Missing when scoring this sentence failed.
    pub polarity: Option<f64>,
    pub mood: SentenceMood,
    #[schema(example = "😊")]
    pub emoji: String,
}

pub struct TextAnalysisPipeline {
    translator: Arc<dyn Translator>,
    scorer: Arc<dyn SentimentScorer>,
}

impl TextAnalysisPipeline {
    pub fn new(translator: Arc<dyn Translator>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { translator, scorer }
    }

    /// Wires the Google translator and the configured sentiment backend.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(&config.translator)?);
        let scorer: Arc<dyn SentimentScorer> = match config.sentiment_backend {
            SentimentBackend::Lexicon => Arc::new(LexiconScorer::new()),
            SentimentBackend::Remote => {
                Arc::new(RemoteScorer::new(&config.sidecar_url, config.sidecar_timeout)?)
            }
        };
        Ok(Self::new(translator, scorer))
    }

    pub fn translator_name(&self) -> &'static str {
        self.translator.name()
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Runs the full analysis. Callers should reject blank input before
    /// getting here; it is answered with `EmptyInput` without touching any
    /// collaborator.
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalysisError> {
        if raw_text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let id = Uuid::new_v4().to_string();
        tracing::info!("📝 [Pipeline] {} analysing {} chars", id, raw_text.chars().count());

        let translation = self.translator.translate_to_english(raw_text).await;
        let status = translation.status();
        let translated_text = translation.into_text();

        let sentiment = self.scorer.score(&translated_text).await.map_err(|e| {
            tracing::error!("❌ [Pipeline] {} scoring failed: {}", id, e);
            AnalysisError::Scoring(e)
        })?;

        let original_sentences = segment(raw_text);
        let translated_sentences = segment(&translated_text);
        if original_sentences.len() != translated_sentences.len() {
            tracing::debug!(
                "[Pipeline] {} sentence count changed in translation ({} -> {}), pairing truncated",
                id,
                original_sentences.len(),
                translated_sentences.len()
            );
        }
        let sentence_pairs = pair_sentences(&original_sentences, &translated_sentences);

        let stats = count_words(&translated_text);

        tracing::info!(
            "✅ [Pipeline] {} done: {} ({:.2}), {} sentences, {} keywords, translation {:?}",
            id,
            sentiment.label(),
            sentiment.polarity,
            sentence_pairs.len(),
            stats.table.len(),
            status
        );

        Ok(AnalysisResult {
            id,
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            sentence_pairs,
            word_frequencies: stats.table,
            filtered_words: stats.filtered_words,
            original_text: raw_text.to_string(),
            translated_text,
            translation: status,
        })
    }

    /// Scores the translated side of the first `MAX_SURFACED_SENTENCES`
    /// pairs. A sentence that fails to score is marked `Unscored` and the
    /// rest still run.
    pub async fn annotate_sentences(&self, pairs: &[SentencePair]) -> Vec<SentenceSentiment> {
        let mut annotated = Vec::with_capacity(pairs.len().min(MAX_SURFACED_SENTENCES));
        for pair in pairs.iter().take(MAX_SURFACED_SENTENCES) {
            let (polarity, mood) = match self.scorer.score(&pair.translated).await {
                Ok(s) => (Some(s.polarity), SentenceMood::from_polarity(s.polarity)),
                Err(e) => {
                    tracing::warn!("⚠️ [Pipeline] sentence skipped: {}", e);
                    (None, SentenceMood::Unscored)
                }
            };
            annotated.push(SentenceSentiment {
                original: pair.original.clone(),
                translated: pair.translated.clone(),
                polarity,
                mood,
                emoji: mood.emoji().to_string(),
            });
        }
        annotated
    }
}
