/// LLM Client — the single point of entry for text-generation calls.
///
/// Talks to an Ollama-compatible `/api/generate` endpoint with one
/// non-streaming request per call. There is deliberately no retry here:
/// a failure goes straight back to the caller.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model endpoint unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Anything that turns a prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`; the production backend
/// is `OllamaClient`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Sends one prompt and returns the raw generated text, untrimmed.
    /// An envelope without a text field yields an empty string.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response envelope of a non-streaming generate call. Only `response` is required
/// for the pipeline; the counters are logged when present.
#[derive(Debug, Deserialize)]
pub struct GenerateEnvelope {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl GenerateEnvelope {
    pub fn into_text(self) -> String {
        self.response.unwrap_or_default()
    }
}

/// reqwest-backed client for a local Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            model,
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model endpoint returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let envelope = parse_envelope(&raw)?;

        debug!(
            "Generate call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
            self.model, envelope.prompt_eval_count, envelope.eval_count
        );

        Ok(envelope.into_text())
    }
}

fn parse_envelope(raw: &str) -> Result<GenerateEnvelope, LlmError> {
    Ok(serde_json::from_str(raw)?)
}
