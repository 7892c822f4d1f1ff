// src/timeline/mod.rs
// Chronological timeline loading and filtering

pub mod batch;
pub mod event;

pub use batch::{Batch, batch_events};
pub use event::{BeadCreated, Event, MessageEvent};

use std::path::Path;
use tracing::{debug, info};

use crate::error::{BriefingError, Result};

/// Load the timeline: a JSON array of events.
///
/// A missing file is fatal, as is any event lacking the fields its type
/// requires.
pub fn load_timeline(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        return Err(BriefingError::TimelineMissing(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    let events: Vec<Event> = serde_json::from_str(&raw)?;

    info!(path = %path.display(), events = events.len(), "Timeline loaded");
    Ok(events)
}

/// Keep only events the formatter renders, in order
pub fn useful_events(events: &[Event]) -> Vec<Event> {
    let useful: Vec<Event> = events.iter().filter(|e| e.is_useful()).cloned().collect();
    debug!(
        total = events.len(),
        useful = useful.len(),
        "Filtered timeline"
    );
    useful
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_timeline(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BriefingError::TimelineMissing(_)));
    }

    #[test]
    fn test_load_and_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"type": "message", "content": "Use dark mode"}},
                {{"type": "bead_closed", "id": "x"}},
                {{"type": "bead_created", "id": "B1", "title": "Add login"}},
                {{"type": "session_start"}}
            ]"#
        )
        .unwrap();

        let events = load_timeline(file.path()).unwrap();
        assert_eq!(events.len(), 4);

        let useful = useful_events(&events);
        assert_eq!(useful.len(), 2);
        assert!(matches!(useful[0], Event::Message(_)));
        assert!(matches!(useful[1], Event::BeadCreated(_)));
    }

    #[test]
    fn test_load_rejects_malformed_message() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"type": "message"}}]"#).unwrap();
        let err = load_timeline(file.path()).unwrap_err();
        assert!(matches!(err, BriefingError::Json(_)));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "message", "content": "x"}}"#).unwrap();
        assert!(load_timeline(file.path()).is_err());
    }
}
