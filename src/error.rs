// src/error.rs
// Error types for the briefing builder

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the briefing library
#[derive(Error, Debug)]
pub enum BriefingError {
    #[error("timeline not found: {}", .0.display())]
    TimelineMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service error: {0}")]
    Service(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using BriefingError
pub type Result<T> = std::result::Result<T, BriefingError>;
