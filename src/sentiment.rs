//! Polarity/subjectivity scoring.
//!
//! Two backends share the `SentimentScorer` trait:
//! - `LexiconScorer`: in-process English lexicon with intensifiers and
//!   negation, no external dependencies.
//! - `RemoteScorer`: calls the ML sidecar (`POST {base}/ml/sentiment`).
//!
//! Both return neutral defaults for blank input without doing any work.

use axum::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;
use utoipa::ToSchema;

use crate::error::ScoringError;

/// Polarity must exceed this (in absolute value) to leave Neutral.
pub const POLARITY_THRESHOLD: f64 = 0.05;
/// Subjectivity must exceed this to count as high.
pub const SUBJECTIVITY_THRESHOLD: f64 = 0.5;

// (word, polarity, subjectivity)
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    vec![
        // positive
        ("amazing", 0.6, 0.9), ("awesome", 1.0, 1.0), ("beautiful", 0.85, 1.0),
        ("best", 1.0, 0.3), ("better", 0.5, 0.5), ("brilliant", 0.9, 1.0),
        ("calm", 0.3, 0.75), ("comfortable", 0.4, 0.6), ("delicious", 1.0, 1.0),
        ("delightful", 1.0, 1.0), ("enjoy", 0.4, 0.5), ("enjoyed", 0.4, 0.5),
        ("excellent", 1.0, 1.0), ("excited", 0.375, 0.75), ("fantastic", 0.4, 0.9),
        ("fine", 0.42, 0.5), ("fun", 0.3, 0.2), ("glad", 0.5, 1.0),
        ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("happy", 0.8, 1.0),
        ("helpful", 0.5, 0.5), ("incredible", 0.9, 0.9), ("interesting", 0.5, 0.5),
        ("love", 0.5, 0.6), ("loved", 0.7, 0.8), ("lovely", 0.5, 0.75),
        ("magnificent", 1.0, 1.0), ("nice", 0.6, 1.0), ("perfect", 1.0, 1.0),
        ("pleasant", 0.73, 0.97), ("positive", 0.23, 0.55), ("pretty", 0.25, 1.0),
        ("success", 0.3, 0.3), ("successful", 0.75, 0.95), ("sunny", 0.4, 0.6),
        ("superb", 1.0, 1.0), ("useful", 0.3, 0.0), ("warm", 0.6, 0.6),
        ("wonderful", 1.0, 1.0),
        // negative
        ("angry", -0.5, 1.0), ("annoying", -0.8, 0.9), ("awful", -1.0, 1.0),
        ("bad", -0.7, 0.67), ("boring", -1.0, 1.0), ("broken", -0.4, 0.4),
        ("cold", -0.6, 1.0), ("difficult", -0.5, 1.0), ("dirty", -0.6, 0.8),
        ("disappointed", -0.75, 0.75), ("disappointing", -0.6, 0.7),
        ("disgusting", -1.0, 1.0), ("dreadful", -1.0, 1.0), ("fail", -0.5, 0.3),
        ("failed", -0.5, 0.3), ("hate", -0.8, 0.9), ("horrible", -1.0, 1.0),
        ("negative", -0.3, 0.4), ("painful", -0.7, 0.9), ("poor", -0.4, 0.6),
        ("sad", -0.5, 1.0), ("slow", -0.3, 0.4), ("stupid", -0.8, 1.0),
        ("terrible", -1.0, 1.0), ("ugly", -0.7, 1.0), ("unhappy", -0.6, 0.9),
        ("useless", -0.5, 0.2), ("worse", -0.4, 0.6), ("worst", -1.0, 1.0),
        ("wrong", -0.5, 0.9),
    ]
    .into_iter()
    .map(|(w, p, s)| (w, (p, s)))
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        ("absolutely", 1.5), ("extremely", 1.5), ("highly", 1.3), ("incredibly", 1.4),
        ("quite", 1.1), ("really", 1.2), ("too", 1.2), ("totally", 1.4),
        ("truly", 1.3), ("very", 1.3),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec!["never", "no", "nobody", "none", "not", "nothing", "nowhere", "neither", "nor"]
        .into_iter()
        .collect()
});

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w']+").expect("token regex is valid"));

/// Negated assessments keep half their strength with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    #[schema(example = 0.25)]
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    #[schema(example = 0.6)]
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_polarity(self.polarity)
    }

    pub fn subjectivity_label(&self) -> SubjectivityLabel {
        SubjectivityLabel::from_score(self.subjectivity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SubjectivityLabel {
    #[serde(rename = "High subjectivity")]
    High,
    #[serde(rename = "Low subjectivity")]
    Low,
}

impl SubjectivityLabel {
    pub fn from_score(subjectivity: f64) -> Self {
        if subjectivity > SUBJECTIVITY_THRESHOLD {
            SubjectivityLabel::High
        } else {
            SubjectivityLabel::Low
        }
    }
}

impl fmt::Display for SubjectivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectivityLabel::High => f.write_str("High subjectivity"),
            SubjectivityLabel::Low => f.write_str("Low subjectivity"),
        }
    }
}

/// Per-sentence category shown next to each sentence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentenceMood {
    Positive,
    Negative,
    Neutral,
    /// Scoring failed for this sentence.
    Unscored,
}

impl SentenceMood {
    pub fn from_polarity(polarity: f64) -> Self {
        match SentimentLabel::from_polarity(polarity) {
            SentimentLabel::Positive => SentenceMood::Positive,
            SentimentLabel::Negative => SentenceMood::Negative,
            SentimentLabel::Neutral => SentenceMood::Neutral,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentenceMood::Positive => "😊",
            SentenceMood::Negative => "😟",
            SentenceMood::Neutral => "😐",
            SentenceMood::Unscored => "",
        }
    }
}

/// Sentiment model operating on English text.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    async fn score(&self, text: &str) -> Result<Sentiment, ScoringError>;
}

/// Lexicon-based scorer. Each known word contributes a (polarity,
/// subjectivity) assessment; the result is the mean over assessments.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score_text(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = LEXICON.get(*token) else {
                continue;
            };

            if i > 0 {
                if let Some(&factor) = INTENSIFIERS.get(tokens[i - 1]) {
                    polarity *= factor;
                    subjectivity *= factor;
                }
            }

            let window = &tokens[i.saturating_sub(2)..i];
            if window.iter().any(|t| is_negation(t)) {
                polarity *= NEGATION_FACTOR;
            }

            assessments.push((polarity, subjectivity));
        }

        if assessments.is_empty() {
            return Sentiment::neutral();
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;

        tracing::debug!(
            "🧠 [Sentiment] {} tokens, {} assessments, polarity {:.3}",
            tokens.len(),
            assessments.len(),
            polarity
        );

        Sentiment::new(polarity, subjectivity)
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(token) || token.ends_with("n't")
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn score(&self, text: &str) -> Result<Sentiment, ScoringError> {
        Ok(self.score_text(text))
    }
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    polarity: f64,
    subjectivity: f64,
}

/// Scores text with the ML sidecar.
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteScorer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScoringError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/ml/sentiment", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl SentimentScorer for RemoteScorer {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn score(&self, text: &str) -> Result<Sentiment, ScoringError> {
        if text.trim().is_empty() {
            return Ok(Sentiment::neutral());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("⚠️ [Sentiment] Sidecar connection failed: {}. Is the ML sidecar running?", e);
                ScoringError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!("⚠️ [Sentiment] Sidecar request failed: {}", response.status());
            return Err(ScoringError::Status(response.status().as_u16()));
        }

        let data = response
            .json::<SentimentResponse>()
            .await
            .map_err(|e| ScoringError::MalformedResponse(e.to_string()))?;

        Ok(Sentiment::new(data.polarity, data.subjectivity))
    }
}
