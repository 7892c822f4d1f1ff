// src/runner.rs
// The batch loop: load, filter, batch, then update and checkpoint per batch

use chrono::Local;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::briefing::{BriefingUpdater, CheckpointWriter, DEFAULT_MAX_TOKENS, SeedSource, load_seed};
use crate::colors;
use crate::error::Result;
use crate::llm::{GenerationService, ModelTier};
use crate::timeline::{Batch, batch_events, load_timeline, useful_events};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);
pub const DEFAULT_TIMELINE: &str = "chronological_timeline.json";

/// Everything one run needs, resolved up front
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub timeline_path: PathBuf,
    pub output_dir: PathBuf,
    pub seed: Option<SeedSource>,
    pub batch_size: NonZeroUsize,
    /// 1-based batch to start from; earlier batches are skipped
    pub start_batch: NonZeroUsize,
    /// Useful events dropped before batching
    pub start_event: usize,
    pub model: ModelTier,
    pub max_tokens: u32,
    /// Delay between consecutive batches
    pub pause: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeline_path: PathBuf::from(DEFAULT_TIMELINE),
            output_dir: PathBuf::from("."),
            seed: None,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            start_batch: NonZeroUsize::MIN,
            start_event: 0,
            model: ModelTier::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            pause: DEFAULT_PAUSE,
        }
    }
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Checkpoint path; not written if no batch was processed
    pub output_path: PathBuf,
    pub batches_processed: usize,
    pub total_batches: usize,
    pub final_briefing: String,
    pub total_cost_usd: f64,
}

/// Load the seed, then run every pending batch
pub async fn run(
    config: &RunConfig,
    service: Arc<dyn GenerationService>,
    out: &mut impl Write,
) -> Result<RunSummary> {
    let seed = load_seed(config.seed.as_ref(), out)?;
    run_with_seed(config, seed, service, out).await
}

/// Run every pending batch starting from `seed` as the current briefing.
///
/// Batches are strictly sequential: each update consumes the previous
/// one's output. The checkpoint is rewritten after every batch, so an
/// aborted run leaves the last good briefing on disk.
pub async fn run_with_seed(
    config: &RunConfig,
    seed: String,
    service: Arc<dyn GenerationService>,
    out: &mut impl Write,
) -> Result<RunSummary> {
    writeln!(out, "Loading timeline...")?;
    let events = load_timeline(&config.timeline_path)?;

    let mut useful = useful_events(&events);
    if config.start_event > 0 {
        writeln!(out, "Skipping first {} events...", config.start_event)?;
        useful.drain(..config.start_event.min(useful.len()));
    }

    let batches = batch_events(&useful, config.batch_size);
    let total = batches.len();
    let useful_count: usize = batches.iter().map(Batch::len).sum();
    let writer = CheckpointWriter::timestamped(&config.output_dir, Local::now());

    writeln!(out, "Timeline has {} events ({} useful)", events.len(), useful_count)?;
    writeln!(out, "Processing in {} batches of {}", total, config.batch_size)?;
    writeln!(out, "Output: {}", writer.path().display())?;
    writeln!(out, "{}", colors::separator('-', 50))?;

    let start = config.start_batch.get();
    if start > 1 {
        writeln!(out, "Skipping to batch {}...", start)?;
    }
    let pending: Vec<Batch> = batches.into_iter().skip(start - 1).collect();
    if pending.is_empty() && start > 1 {
        warn!(start_batch = start, total, "Start batch is past the last batch, nothing to do");
        writeln!(out, "{}", colors::warning(&format!("No batches at or after {} (total {})", start, total)))?;
    }

    info!(
        total_batches = total,
        pending = pending.len(),
        model = %config.model,
        output = %writer.path().display(),
        "Starting briefing run"
    );

    let updater = BriefingUpdater::new(service, config.model, config.max_tokens);
    let mut briefing = seed;
    let mut total_cost = 0.0;

    for (pos, batch) in pending.iter().enumerate() {
        writeln!(out, "\n{}", colors::header(&format!("Processing batch {}/{}...", batch.number, total)))?;

        let outcome = updater.update(&briefing, batch, total, out).await?;
        briefing = outcome.briefing;
        total_cost += outcome.completion.cost_usd.unwrap_or(0.0);

        writer.write(&briefing, batch.number, total)?;

        if pos + 1 < pending.len() && !config.pause.is_zero() {
            tokio::time::sleep(config.pause).await;
        }
    }

    writeln!(out, "\n{}", colors::separator('=', 50))?;
    if pending.is_empty() {
        writeln!(out, "Nothing processed; no briefing written")?;
    } else {
        writeln!(out, "{}", colors::success(&format!("COMPLETE! Briefing saved to: {}", writer.path().display())))?;
    }
    writeln!(out, "Final briefing: {} characters", briefing.chars().count())?;

    info!(
        batches = pending.len(),
        cost_usd = total_cost,
        "Briefing run complete"
    );

    Ok(RunSummary {
        output_path: writer.path().to_path_buf(),
        batches_processed: pending.len(),
        total_batches: total,
        final_briefing: briefing,
        total_cost_usd: total_cost,
    })
}
