//! HTTP surface consumed by the presentation layer.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::AnalysisError;
use crate::frequency::{count_prefixes, PrefixCount, WordCount};
use crate::pipeline::{AnalysisResult, SentenceSentiment, TextAnalysisPipeline};
use crate::segment::SentencePair;
use crate::sentiment::{SentenceMood, SentimentLabel, SubjectivityLabel};
use crate::translate::TranslationStatus;
use crate::typing::words_per_minute;

/// File extensions accepted by `/analyze/file`.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "csv", "md"];

pub struct AppState {
    pub pipeline: TextAnalysisPipeline,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[schema(example = "Me encanta este día. El clima es terrible.")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub sentiment_label: SentimentLabel,
    pub subjectivity_label: SubjectivityLabel,
    /// Ten most frequent keywords
    pub top_words: Vec<WordCount>,
    /// Raw substring counts on the lowercased original text
    pub prefix_counts: Vec<PrefixCount>,
    /// Up to ten sentence pairs with their mood
    pub sentences: Vec<SentenceSentiment>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TypingSpeedRequest {
    pub text: String,
    #[schema(value_type = String, example = "2024-05-01T10:00:00Z")]
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TypingSpeedResponse {
    pub words_per_minute: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub translator: String,
    pub scorer: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
        }),
    )
}

/// Rejects blank input so the pipeline is never called with it.
pub fn validate_input(text: &str) -> Result<&str, ApiError> {
    if text.trim().is_empty() {
        tracing::warn!("⚠️ [API] Empty input rejected");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Please enter some text to analyze.",
        ));
    }
    Ok(text)
}

fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

async fn run_analysis(state: &AppState, text: &str) -> Result<Json<AnalysisResponse>, ApiError> {
    let text = validate_input(text)?;

    let result = state.pipeline.analyze(text).await.map_err(|e| {
        tracing::error!("🔥 [API] Analysis failed: {}", e);
        match e {
            AnalysisError::EmptyInput => {
                api_error(StatusCode::BAD_REQUEST, "Please enter some text to analyze.")
            }
            AnalysisError::Scoring(_) => api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Analysis failed. Please try again later.",
            ),
        }
    })?;

    let sentences = state
        .pipeline
        .annotate_sentences(result.top_sentence_pairs())
        .await;
    let sentiment = result.sentiment();

    Ok(Json(AnalysisResponse {
        sentiment_label: sentiment.label(),
        subjectivity_label: sentiment.subjectivity_label(),
        top_words: result.top_words().to_vec(),
        prefix_counts: count_prefixes(&result.original_text),
        sentences,
        result,
    }))
}

/// Analyze text
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result", body = AnalysisResponse),
        (status = 400, description = "No text provided", body = ErrorResponse),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    run_analysis(&state, &req.text).await
}

/// Analyze an uploaded .txt, .csv or .md file
#[utoipa::path(
    post,
    path = "/analyze/file",
    params(("name" = String, Query, description = "Original file name, e.g. notes.txt")),
    request_body(content = String, description = "UTF-8 file contents", content_type = "text/plain"),
    responses(
        (status = 200, description = "Analysis result", body = AnalysisResponse),
        (status = 400, description = "Empty, non UTF-8 or unsupported file", body = ErrorResponse),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FileQuery>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, ApiError> {
    if !has_allowed_extension(&query.name) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Unsupported file type. Use .txt, .csv or .md.",
        ));
    }
    let content = std::str::from_utf8(&body)
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "File is not valid UTF-8."))?;

    tracing::info!("📄 [API] Analysing file {} ({} bytes)", query.name, body.len());
    run_analysis(&state, content).await
}

/// Words per minute since the user started typing
#[utoipa::path(
    post,
    path = "/typing-speed",
    request_body = TypingSpeedRequest,
    responses((status = 200, description = "Typing speed", body = TypingSpeedResponse)),
    tag = "analysis"
)]
pub async fn typing_speed(Json(req): Json<TypingSpeedRequest>) -> Json<TypingSpeedResponse> {
    Json(TypingSpeedResponse {
        words_per_minute: words_per_minute(&req.text, req.started_at, Utc::now()),
    })
}

/// Service health and configured backends
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        translator: state.pipeline.translator_name().to_string(),
        scorer: state.pipeline.scorer_name().to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze_text, analyze_file, typing_speed, health),
    components(
        schemas(
            AnalyzeRequest,
            AnalysisResponse,
            AnalysisResult,
            SentencePair,
            SentenceSentiment,
            SentenceMood,
            WordCount,
            PrefixCount,
            SentimentLabel,
            SubjectivityLabel,
            TranslationStatus,
            TypingSpeedRequest,
            TypingSpeedResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "analysis", description = "Text Analysis API"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/analyze", post(analyze_text))
        .route("/analyze/file", post(analyze_file))
        .route("/typing-speed", post(typing_speed))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
