// src/llm/anthropic.rs
// Anthropic Messages API client with SSE streaming

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{Completion, GenerationRequest, GenerationService, ModelTier, StreamEvent, Usage};
use crate::error::{BriefingError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    #[cfg(test)]
    fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(BriefingError::Config("ANTHROPIC_API_KEY is empty".into()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl GenerationService for AnthropicClient {
    async fn create_stream(&self, request: GenerationRequest) -> Result<mpsc::Receiver<StreamEvent>> {
        let body = MessagesRequest::from_request(&request);
        let tier = request.model;

        info!(
            model = body.model,
            prompt_len = request.prompt.len(),
            max_tokens = body.max_tokens,
            "Starting Anthropic stream"
        );

        let request_builder = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let mut es = EventSource::new(request_builder)
            .map_err(|e| BriefingError::Service(format!("failed to open event stream: {}", e)))?;

        let (tx, rx) = mpsc::channel(100);

        tokio::spawn(async move {
            let start = Instant::now();
            let mut state = StreamState::new(tier);

            while let Some(event) = es.next().await {
                match event {
                    Ok(Event::Open) => {
                        debug!("Anthropic SSE connection opened");
                    }
                    Ok(Event::Message(msg)) => {
                        let forwarded = match state.handle(&msg.data) {
                            Ok(Some(ev)) => tx.send(ev).await.is_ok(),
                            Ok(None) => true,
                            Err(e) => {
                                warn!(error = %e, event = %msg.event, "Malformed stream payload");
                                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                                break;
                            }
                        };
                        if !forwarded || state.finished {
                            break;
                        }
                    }
                    Err(reqwest_eventsource::Error::StreamEnded) => {
                        if !state.finished {
                            let _ = tx
                                .send(StreamEvent::Error("stream ended before message_stop".into()))
                                .await;
                        }
                        break;
                    }
                    Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                        let body = response.text().await.unwrap_or_default();
                        error!(status = %status, "Anthropic API rejected request");
                        let _ = tx
                            .send(StreamEvent::Error(format!("API error {}: {}", status, body)))
                            .await;
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "Anthropic stream error");
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        break;
                    }
                }
            }

            // EventSource reconnects on its own unless closed
            es.close();

            info!(
                duration_ms = start.elapsed().as_millis() as u64,
                input_tokens = state.usage.input_tokens,
                output_tokens = state.usage.output_tokens,
                finished = state.finished,
                "Anthropic stream closed"
            );
        });

        Ok(rx)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: &'static str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
    stream: bool,
}

impl MessagesRequest {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            model: request.model.model_id(),
            max_tokens: request.max_tokens,
            system: request.system.clone(),
            messages: vec![Message {
                role: "user",
                content: request.prompt.clone(),
            }],
            stream: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SsePayload {
    MessageStart {
        message: MessageStart,
    },
    ContentBlockDelta {
        delta: ContentDelta,
    },
    MessageDelta {
        #[serde(default)]
        delta: MessageDeltaBody,
        #[serde(default)]
        usage: Option<DeltaUsage>,
    },
    MessageStop,
    Error {
        error: ApiError,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessageStart {
    #[serde(default)]
    usage: Option<StartUsage>,
}

#[derive(Debug, Deserialize)]
struct StartUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentDelta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct MessageDeltaBody {
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeltaUsage {
    #[serde(default)]
    input_tokens: Option<u32>,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Folds SSE payloads into stream events and running usage
#[derive(Debug)]
struct StreamState {
    tier: ModelTier,
    usage: Usage,
    stop_reason: Option<String>,
    finished: bool,
}

impl StreamState {
    fn new(tier: ModelTier) -> Self {
        Self {
            tier,
            usage: Usage::default(),
            stop_reason: None,
            finished: false,
        }
    }

    fn handle(&mut self, data: &str) -> Result<Option<StreamEvent>> {
        let payload: SsePayload = serde_json::from_str(data)?;

        let event = match payload {
            SsePayload::MessageStart { message } => {
                if let Some(u) = message.usage {
                    self.usage.input_tokens = u.input_tokens;
                    self.usage.output_tokens = u.output_tokens;
                }
                None
            }
            SsePayload::ContentBlockDelta {
                delta: ContentDelta::TextDelta { text },
            } if !text.is_empty() => Some(StreamEvent::TextDelta(text)),
            SsePayload::ContentBlockDelta { .. } => None,
            SsePayload::MessageDelta { delta, usage } => {
                if delta.stop_reason.is_some() {
                    self.stop_reason = delta.stop_reason;
                }
                if let Some(u) = usage {
                    if let Some(input) = u.input_tokens {
                        self.usage.input_tokens = input;
                    }
                    self.usage.output_tokens = u.output_tokens;
                }
                None
            }
            SsePayload::MessageStop => {
                self.finished = true;
                Some(StreamEvent::Done(Completion {
                    turns: 1,
                    usage: self.usage,
                    cost_usd: Some(self.tier.pricing().calculate_cost(&self.usage)),
                    stop_reason: self.stop_reason.clone(),
                }))
            }
            SsePayload::Error { error } => {
                self.finished = true;
                Some(StreamEvent::Error(format!("{}: {}", error.error_type, error.message)))
            }
            SsePayload::Other => None,
        };

        Ok(event)
    }
}
