use dotenv::dotenv;
use std::sync::Arc;

use text_analyzer::api::{self, AppState};
use text_analyzer::config::AppConfig;
use text_analyzer::pipeline::TextAnalysisPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let pipeline = TextAnalysisPipeline::from_config(&config)?;
    tracing::info!(
        "🚀 Translator: {} ({} -> {}), scorer: {}",
        pipeline.translator_name(),
        config.translator.source_lang,
        config.translator.target_lang,
        pipeline.scorer_name()
    );

    let state = Arc::new(AppState { pipeline });
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
