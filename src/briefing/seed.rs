// src/briefing/seed.rs
// Starting briefing: a file, standard input, or nothing

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;

/// Where the starting briefing comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Read the whole of standard input
    Stdin,
    File(PathBuf),
}

impl SeedSource {
    /// Parse a `--seed` value; `-` means standard input
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

/// Load the starting briefing.
///
/// A seed file that does not exist is not an error: the run starts from an
/// empty briefing with a warning.
pub fn load_seed(source: Option<&SeedSource>, out: &mut impl Write) -> Result<String> {
    match source {
        None => Ok(String::new()),
        Some(SeedSource::Stdin) => {
            writeln!(out, "Reading seed briefing from stdin...")?;
            read_seed(std::io::stdin().lock(), out)
        }
        Some(SeedSource::File(path)) => load_seed_file(path, out),
    }
}

/// Read a seed from any reader (standard input in production)
pub fn read_seed(mut reader: impl Read, out: &mut impl Write) -> Result<String> {
    let mut seed = String::new();
    reader.read_to_string(&mut seed)?;
    writeln!(out, "Seed briefing: {} characters", seed.chars().count())?;
    info!(chars = seed.len(), "Seed read from stream");
    Ok(seed)
}

fn load_seed_file(path: &Path, out: &mut impl Write) -> Result<String> {
    if !path.exists() {
        warn!(path = %path.display(), "Seed file not found, starting with empty briefing");
        writeln!(out, "Warning: Seed file not found: {}", path.display())?;
        writeln!(out, "Starting with empty briefing")?;
        return Ok(String::new());
    }

    writeln!(out, "Loading seed briefing from: {}", path.display())?;
    let seed = std::fs::read_to_string(path)?;
    writeln!(out, "Seed briefing: {} characters", seed.chars().count())?;
    info!(path = %path.display(), chars = seed.len(), "Seed loaded");
    Ok(seed)
}
