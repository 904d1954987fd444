//! Runs one analysis from the command line and prints the result as JSON.
//!
//! Usage: `debug_translate Me encanta este día.` or pipe text on stdin.

use anyhow::{bail, Result};
use std::io::Read;

use text_analyzer::config::AppConfig;
use text_analyzer::pipeline::TextAnalysisPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };

    if text.trim().is_empty() {
        bail!("no text given: pass it as arguments or on stdin");
    }

    let config = AppConfig::from_env();
    let pipeline = TextAnalysisPipeline::from_config(&config)?;
    println!("🌐 Translating with {} ({} -> {})...", pipeline.translator_name(), config.translator.source_lang, config.translator.target_lang);

    let result = pipeline.analyze(&text).await?;
    let sentences = pipeline.annotate_sentences(result.top_sentence_pairs()).await;

    println!("Translation: {:?}", result.translation);
    println!("Sentiment:   {} ({:.3})", result.sentiment().label(), result.polarity);
    println!("Subjectivity: {} ({:.3})", result.sentiment().subjectivity_label(), result.subjectivity);
    for s in &sentences {
        println!("{} {} -> {}", s.emoji, s.original, s.translated);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
