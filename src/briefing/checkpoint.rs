// src/briefing/checkpoint.rs
// Per-batch snapshot of the briefing on disk

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// Overwrites one output document after every batch
#[derive(Debug, Clone)]
pub struct CheckpointWriter {
    path: PathBuf,
}

impl CheckpointWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Writer targeting `BRIEFING_<YYYYmmdd_HHMMSS>.md` inside `dir`
    pub fn timestamped(dir: &Path, now: DateTime<Local>) -> Self {
        Self::new(dir.join(output_file_name(now)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the document with the briefing as of `batch` of `total`
    pub fn write(&self, briefing: &str, batch: usize, total: usize) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, render_checkpoint(briefing, batch, total))?;
        debug!(path = %self.path.display(), batch, total, "Checkpoint written");
        Ok(())
    }
}

pub fn output_file_name(now: DateTime<Local>) -> String {
    format!("BRIEFING_{}.md", now.format("%Y%m%d_%H%M%S"))
}

/// Checkpoint document body: fixed header, progress line, briefing
pub fn render_checkpoint(briefing: &str, batch: usize, total: usize) -> String {
    format!(
        "# Accumulated Briefing\n\n**Progress:** {}/{} batches processed\n\n---\n\n{}",
        batch, total, briefing
    )
}
