// src/lib.rs
// Briefing builder - accumulates a project briefing from a session timeline

pub mod briefing;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod llm;
pub mod runner;
pub mod timeline;

pub use error::{BriefingError, Result};
pub use runner::{RunConfig, RunSummary, run, run_with_seed};
