//! One briefing update per batch
//!
//! Sends a self-contained request to the generation service, echoes the
//! streamed text to the console, and returns the trimmed result as the new
//! briefing.

use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};

use super::prompt::{SYSTEM_PROMPT, build_update_prompt};
use crate::colors;
use crate::error::{BriefingError, Result};
use crate::llm::{Completion, GenerationRequest, GenerationService, ModelTier, StreamEvent};
use crate::timeline::Batch;

/// Default output cap per request
pub const DEFAULT_MAX_TOKENS: u32 = 16_000;

/// Result of one update step
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub briefing: String,
    pub completion: Completion,
}

pub struct BriefingUpdater {
    service: Arc<dyn GenerationService>,
    model: ModelTier,
    max_tokens: u32,
}

impl BriefingUpdater {
    pub fn new(service: Arc<dyn GenerationService>, model: ModelTier, max_tokens: u32) -> Self {
        Self {
            service,
            model,
            max_tokens,
        }
    }

    /// Build the request for one batch. Pure: depends only on its inputs.
    pub fn request_for(&self, current_briefing: &str, batch: &Batch, total_batches: usize) -> GenerationRequest {
        GenerationRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_update_prompt(current_briefing, &batch.render(), batch.number, total_batches),
            model: self.model,
            max_tokens: self.max_tokens,
        }
    }

    /// Run one update. Any service failure is returned as-is; there is no retry.
    #[instrument(skip_all, fields(batch = batch.number, total = total_batches, events = batch.len()))]
    pub async fn update(
        &self,
        current_briefing: &str,
        batch: &Batch,
        total_batches: usize,
        out: &mut impl Write,
    ) -> Result<BatchOutcome> {
        let request = self.request_for(current_briefing, batch, total_batches);
        let mut rx = self.service.create_stream(request).await?;

        let (text, completion) = process_stream(&mut rx, out).await?;
        let briefing = text.trim().to_string();

        writeln!(
            out,
            "\n  {}",
            colors::status(&format!(
                "[Batch {}: {} turns, ${:.4}]",
                batch.number,
                completion.turns,
                completion.cost_usd.unwrap_or(0.0)
            ))
        )?;

        info!(
            provider = self.service.name(),
            briefing_len = briefing.len(),
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "Batch processed"
        );

        Ok(BatchOutcome {
            briefing,
            completion,
        })
    }
}

/// Echo and accumulate text deltas until the stream completes.
///
/// The accumulated text is only returned once `Done` arrives; an error
/// event or a stream that closes early fails the whole update.
pub async fn process_stream(
    rx: &mut mpsc::Receiver<StreamEvent>,
    out: &mut impl Write,
) -> Result<(String, Completion)> {
    let mut accumulated = String::new();

    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::TextDelta(delta) => {
                out.write_all(delta.as_bytes())?;
                out.flush()?;
                accumulated.push_str(&delta);
            }
            StreamEvent::Done(completion) => return Ok((accumulated, completion)),
            StreamEvent::Error(e) => return Err(BriefingError::Service(e)),
        }
    }

    Err(BriefingError::Service(
        "stream closed before the response completed".into(),
    ))
}
