// src/main.rs
// Briefing builder CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use briefing::cli::Cli;
use briefing::colors::{banner_accent, banner_line, separator};
use briefing::config::Config;
use briefing::llm::AnthropicClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.briefing/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".briefing").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    // Logs go to stderr; stdout carries progress and the streamed briefing
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let run_config = cli.run_config(&file_config)?;
    let service_config = cli.service_config(&file_config)?;

    let client = AnthropicClient::with_base_url(service_config.api_key, service_config.base_url)
        .context("failed to build Anthropic client")?;

    println!();
    println!("{}", banner_accent(&format!("Briefing Builder {}", env!("CARGO_PKG_VERSION"))));
    println!("{}", separator('-', 50));
    println!("{}", banner_line("Model", &run_config.model.to_string()));
    println!("{}", banner_line("Timeline", &run_config.timeline_path.display().to_string()));
    println!("{}", banner_line("Batch size", &run_config.batch_size.to_string()));
    println!();

    let mut stdout = std::io::stdout();
    let summary = briefing::run(&run_config, Arc::new(client), &mut stdout)
        .await
        .with_context(|| format!("briefing run failed ({})", run_config.timeline_path.display()))?;

    tracing::debug!(
        processed = summary.batches_processed,
        total = summary.total_batches,
        "Exiting"
    );

    Ok(())
}
