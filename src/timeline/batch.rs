// src/timeline/batch.rs
// Contiguous, order-preserving batching of useful events

use std::num::NonZeroUsize;

use super::event::Event;

/// A numbered group of useful events processed in one update step
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// 1-based position in the run's original numbering
    pub number: usize,
    pub events: Vec<Event>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rendered lines of every event, separated by blank lines
    pub fn render(&self) -> String {
        self.events
            .iter()
            .filter_map(Event::format)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Split events into batches of at most `size`, numbered from 1.
///
/// Every event lands in exactly one batch, in input order. Only the last
/// batch may be short.
pub fn batch_events(events: &[Event], size: NonZeroUsize) -> Vec<Batch> {
    events
        .chunks(size.get())
        .enumerate()
        .map(|(i, chunk)| Batch {
            number: i + 1,
            events: chunk.to_vec(),
        })
        .collect()
}
