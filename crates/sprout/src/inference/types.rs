//! Wire types for the `generateContent` endpoint

use serde::{Deserialize, Serialize};

pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

// Request
// =======

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
  pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
  pub parts: Vec<Part>,
}

/// A text part or an inline binary part. Text always comes first.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
  Text { text: String },
  InlineData { inline_data: InlineData },
}

/// Base64 inline payload used for image requests
#[derive(Debug, Serialize)]
pub struct InlineData {
  pub mime_type: String,
  pub data: String,
}

// Response
// ========

/// Top-level response envelope. Every field is optional so that a missing
/// structure is reported as a content failure rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
  #[serde(default)]
  pub candidates: Option<Vec<Candidate>>,
  #[serde(default, rename = "promptFeedback")]
  pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
  #[serde(default)]
  pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
  #[serde(default)]
  pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
  #[serde(default)]
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
  #[serde(default, rename = "blockReason")]
  pub block_reason: Option<String>,
}

/// Error envelope returned alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
  pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
  #[serde(default)]
  pub message: String,
}

impl GenerateContentResponse {
  /// Text of `candidates[0].content.parts[0].text`, if the structure is there
  pub fn first_text(&self) -> Option<&str> {
    self
      .candidates
      .as_ref()?
      .first()?
      .content
      .as_ref()?
      .parts
      .first()?
      .text
      .as_deref()
  }

  pub fn has_candidates(&self) -> bool {
    self.candidates.as_ref().is_some_and(|candidates| !candidates.is_empty())
  }

  pub fn block_reason(&self) -> Option<&str> {
    self.prompt_feedback.as_ref()?.block_reason.as_deref()
  }
}
