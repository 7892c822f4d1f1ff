// src/llm/mod.rs
// Generation service abstraction and the Anthropic implementation

mod anthropic;
mod pricing;

pub use anthropic::{AnthropicClient, DEFAULT_BASE_URL};
pub use pricing::{ModelPricing, ModelTier};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// A single self-contained request: one system instruction, one user turn.
///
/// There is no conversation id or prior-turn history on purpose. Every call
/// must be reproducible from its own contents.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub model: ModelTier,
    pub max_tokens: u32,
}

/// Token usage reported by the service for one request
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Final accounting for a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Model turns consumed; always 1 for a single-turn request
    pub turns: u32,
    pub usage: Usage,
    pub cost_usd: Option<f64>,
    pub stop_reason: Option<String>,
}

/// Events emitted while a response streams in
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A fragment of response text, in arrival order
    TextDelta(String),
    /// The response finished successfully
    Done(Completion),
    /// The service reported a failure mid-stream
    Error(String),
}

/// Stateless text-generation backend
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Start a streaming request. Events arrive on the returned receiver;
    /// the stream ends with `Done` or `Error`.
    async fn create_stream(&self, request: GenerationRequest) -> Result<mpsc::Receiver<StreamEvent>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
