// src/briefing/mod.rs
// Briefing accumulation: seed, prompt, update step, checkpoint

pub mod checkpoint;
pub mod prompt;
pub mod seed;
pub mod updater;

pub use checkpoint::{CheckpointWriter, render_checkpoint};
pub use prompt::{EMPTY_BRIEFING_MARKER, SYSTEM_PROMPT, build_update_prompt};
pub use seed::{SeedSource, load_seed};
pub use updater::{BatchOutcome, BriefingUpdater, DEFAULT_MAX_TOKENS, process_stream};
