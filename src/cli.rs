// src/cli.rs
// Command-line surface and config resolution

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::briefing::{DEFAULT_MAX_TOKENS, SeedSource};
use crate::config::Config;
use crate::error::{BriefingError, Result};
use crate::llm::{DEFAULT_BASE_URL, ModelTier};
use crate::runner::{DEFAULT_BATCH_SIZE, DEFAULT_PAUSE, DEFAULT_TIMELINE, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "briefing")]
#[command(about = "Generate a project briefing from a chronological session timeline")]
#[command(version)]
pub struct Cli {
    /// Number of events per batch (default: 10)
    #[arg(short = 'c', long)]
    pub batch_size: Option<NonZeroUsize>,

    /// Seed briefing file to start from (use - for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub seed: Option<String>,

    /// Starting batch number
    #[arg(short = 'n', long, default_value = "1")]
    pub start_batch: NonZeroUsize,

    /// Number of useful events to skip before batching
    #[arg(short = 'e', long, default_value_t = 0)]
    pub start_event: usize,

    /// Model to use (default: sonnet)
    #[arg(short, long, value_enum)]
    pub model: Option<ModelTier>,

    /// Timeline JSON file
    #[arg(long, env = "BRIEFING_TIMELINE", value_name = "FILE")]
    pub timeline: Option<PathBuf>,

    /// Directory the briefing is written to
    #[arg(long, env = "BRIEFING_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Output token cap per request
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Pause between batches in milliseconds (default: 500)
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Config file (default: ~/.briefing/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Credentials for the generation service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Cli {
    /// Resolve the run settings: CLI args > env vars (handled by clap) >
    /// config file > defaults
    pub fn run_config(&self, file: &Config) -> Result<RunConfig> {
        let batch_size = match self.batch_size {
            Some(size) => size,
            None => {
                let size = file.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
                NonZeroUsize::new(size)
                    .ok_or_else(|| BriefingError::Config("batch_size must be at least 1".into()))?
            }
        };

        let pause = self
            .pause_ms
            .or(file.pause_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PAUSE);

        Ok(RunConfig {
            timeline_path: self
                .timeline
                .clone()
                .or_else(|| file.timeline.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TIMELINE)),
            output_dir: self
                .output_dir
                .clone()
                .or_else(|| file.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            seed: self.seed.as_deref().map(SeedSource::parse),
            batch_size,
            start_batch: self.start_batch,
            start_event: self.start_event,
            model: self.model.or(file.model).unwrap_or_default(),
            max_tokens: self.max_tokens.or(file.max_tokens).unwrap_or(DEFAULT_MAX_TOKENS),
            pause,
        })
    }

    pub fn service_config(&self, file: &Config) -> Result<ServiceConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| file.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                BriefingError::Config(
                    "ANTHROPIC_API_KEY required (set via --api-key, env var, or ~/.briefing/config.toml)".into(),
                )
            })?;

        let base_url = self
            .base_url
            .clone()
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ServiceConfig { api_key, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["briefing"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--timeline", "t.json", "--output-dir", "out"]);
        let config = cli.run_config(&Config::default()).unwrap();

        assert_eq!(config.batch_size.get(), 10);
        assert_eq!(config.start_batch.get(), 1);
        assert_eq!(config.start_event, 0);
        assert_eq!(config.model, ModelTier::Sonnet);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.pause, Duration::from_millis(500));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-c", "20", "-s", "-", "-n", "3", "-e", "7", "-m", "opus", "--timeline", "t.json"]);
        let config = cli.run_config(&Config::default()).unwrap();

        assert_eq!(config.batch_size.get(), 20);
        assert_eq!(config.seed, Some(SeedSource::Stdin));
        assert_eq!(config.start_batch.get(), 3);
        assert_eq!(config.start_event, 7);
        assert_eq!(config.model, ModelTier::Opus);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(Cli::try_parse_from(["briefing", "--batch-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["briefing", "--batch-size", "-3"]).is_err());
    }

    #[test]
    fn test_zero_start_batch_rejected() {
        assert!(Cli::try_parse_from(["briefing", "--start-batch", "0"]).is_err());
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["briefing", "--model", "gpt"]).is_err());
    }

    #[test]
    fn test_config_file_fallback() {
        let cli = parse(&["--timeline", "t.json", "--output-dir", "out"]);
        let file = Config {
            model: Some(ModelTier::Haiku),
            batch_size: Some(4),
            pause_ms: Some(0),
            max_tokens: Some(2048),
            ..Config::default()
        };
        let config = cli.run_config(&file).unwrap();

        assert_eq!(config.model, ModelTier::Haiku);
        assert_eq!(config.batch_size.get(), 4);
        assert!(config.pause.is_zero());
        assert_eq!(config.max_tokens, 2048);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let cli = parse(&["-m", "opus", "-c", "2", "--timeline", "cli.json", "--output-dir", "out"]);
        let file = Config {
            model: Some(ModelTier::Haiku),
            batch_size: Some(4),
            timeline: Some(PathBuf::from("file.json")),
            ..Config::default()
        };
        let config = cli.run_config(&file).unwrap();

        assert_eq!(config.model, ModelTier::Opus);
        assert_eq!(config.batch_size.get(), 2);
        assert_eq!(config.timeline_path, PathBuf::from("cli.json"));
    }

    #[test]
    fn test_zero_batch_size_in_config_file_rejected() {
        let cli = parse(&["--timeline", "t.json", "--output-dir", "out"]);
        let file = Config {
            batch_size: Some(0),
            ..Config::default()
        };
        assert!(matches!(cli.run_config(&file), Err(BriefingError::Config(_))));
    }

    #[test]
    fn test_service_config_from_file() {
        let cli = parse(&["--api-key", "", "--base-url", "http://localhost:9000"]);
        let file = Config {
            api_key: Some("sk-file".into()),
            ..Config::default()
        };
        // An empty CLI key is filtered out after taking precedence, so it is an error
        assert!(cli.service_config(&file).is_err());

        let cli = parse(&["--api-key", "sk-cli", "--base-url", "http://localhost:9000"]);
        let service = cli.service_config(&file).unwrap();
        assert_eq!(service.api_key, "sk-cli");
        assert_eq!(service.base_url, "http://localhost:9000");
    }
}
