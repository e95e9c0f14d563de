//! HTTP client for the generative model API
//!
//! Sends one `generateContent` request per job and reduces the response to the
//! answer text, classifying failures as transport or content problems.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Result, SproutError};
use crate::inference::job::RequestJob;
use crate::inference::types::{ApiErrorEnvelope, GenerateContentResponse};

/// Backend that turns a job into answer text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceService: Send + Sync {
  async fn generate(&self, job: &RequestJob) -> Result<String>;
}

pub struct GeminiClient {
  client: Client,
  config: ClientConfig,
}

impl GeminiClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    if config.api_key.trim().is_empty() {
      return Err(SproutError::validation("no API key configured (set SPROUT_API_KEY)"));
    }

    let client = Client::builder().timeout(config.timeout()).build()?;
    Ok(Self { client, config })
  }

  async fn generate_content(&self, job: &RequestJob) -> Result<String> {
    let url = self.config.endpoint(job.model());
    debug!(model = job.model(), with_image = job.image().is_some(), "sending generateContent request");

    let response = self
      .client
      .post(&url)
      .query(&[("key", self.config.api_key.as_str())])
      .json(&job.to_request())
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      return Err(SproutError::transport(format!("HTTP {}: {}", status.as_u16(), api_error_message(&body))));
    }

    let parsed: GenerateContentResponse = serde_json::from_str(&body)
      .map_err(|e| SproutError::transport(format!("invalid response body: {e}")))?;

    extract_text(&parsed)
  }
}

#[async_trait]
impl InferenceService for GeminiClient {
  async fn generate(&self, job: &RequestJob) -> Result<String> {
    self.generate_content(job).await
  }
}

/// Pull `candidates[0].content.parts[0].text` out of a decoded response
pub fn extract_text(response: &GenerateContentResponse) -> Result<String> {
  if !response.has_candidates() {
    let message = match response.block_reason() {
      Some(reason) => format!("prompt was blocked ({reason})"),
      None => "response contained no candidates".to_string(),
    };
    return Err(SproutError::content(message));
  }

  response
    .first_text()
    .map(str::to_string)
    .ok_or_else(|| SproutError::content("first candidate has no text part"))
}

fn api_error_message(body: &str) -> String {
  match serde_json::from_str::<ApiErrorEnvelope>(body) {
    Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
    _ if body.trim().is_empty() => "empty response body".to_string(),
    _ => body.trim().to_string(),
  }
}
