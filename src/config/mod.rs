// src/config/mod.rs
// File-based configuration from ~/.briefing/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::llm::ModelTier;

/// Optional defaults read from the config file.
///
/// Every field is optional; command-line flags and environment variables
/// take precedence.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Anthropic API key
    pub api_key: Option<String>,

    /// API base URL (for proxies and gateways)
    pub base_url: Option<String>,

    /// Default model tier
    pub model: Option<ModelTier>,

    /// Timeline JSON path
    pub timeline: Option<PathBuf>,

    /// Directory checkpoints are written to
    pub output_dir: Option<PathBuf>,

    /// Events per batch
    pub batch_size: Option<usize>,

    /// Output token cap per request
    pub max_tokens: Option<u32>,

    /// Pause between batches, in milliseconds
    pub pause_ms: Option<u64>,
}

impl Config {
    /// Load config from ~/.briefing/config.toml
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path. Missing or unparsable files yield
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".briefing")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".briefing"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
model = "haiku"
timeline = "/data/timeline.json"
batch_size = 25
pause_ms = 0
"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.model, Some(ModelTier::Haiku));
        assert_eq!(config.timeline, Some(PathBuf::from("/data/timeline.json")));
        assert_eq!(config.batch_size, Some(25));
        assert_eq!(config.pause_ms, Some(0));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("absent.toml")), Config::default());
    }

    #[test]
    fn test_invalid_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = [unterminated").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
