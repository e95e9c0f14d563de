use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::config::DEFAULT_MODEL;
use crate::error::{Result, SproutError};
use crate::inference::types::{Content, GenerateContentRequest, InlineData, Part, IMAGE_MIME_TYPE};

/// Logical channel with at most one tracked outstanding call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
  Identify,
  CareGuide,
  Disease,
  Translate,
}

impl Slot {
  pub const ALL: [Slot; 4] = [Slot::Identify, Slot::CareGuide, Slot::Disease, Slot::Translate];

  pub(crate) fn index(self) -> usize {
    match self {
      Slot::Identify => 0,
      Slot::CareGuide => 1,
      Slot::Disease => 2,
      Slot::Translate => 3,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Slot::Identify => "identify",
      Slot::CareGuide => "care-guide",
      Slot::Disease => "disease",
      Slot::Translate => "translate",
    }
  }
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// One outbound inference request. Cheap to clone; the image bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestJob {
  prompt: String,
  image: Option<Arc<[u8]>>,
  model: String,
}

impl RequestJob {
  /// Text-only job against the default model
  pub fn text(prompt: impl Into<String>) -> Result<Self> {
    Self::new(prompt, None, DEFAULT_MODEL)
  }

  /// Text plus image job against the default model
  pub fn with_image(prompt: impl Into<String>, image: Vec<u8>) -> Result<Self> {
    Self::new(prompt, Some(image), DEFAULT_MODEL)
  }

  pub fn new(prompt: impl Into<String>, image: Option<Vec<u8>>, model: impl Into<String>) -> Result<Self> {
    let prompt = prompt.into();
    if prompt.trim().is_empty() {
      return Err(SproutError::validation("prompt must not be empty"));
    }

    let model = model.into();
    if model.trim().is_empty() {
      return Err(SproutError::validation("model must not be empty"));
    }

    Ok(Self { prompt, image: image.map(Arc::from), model })
  }

  /// Same prompt and image against another model
  pub fn for_model(&self, model: impl Into<String>) -> Result<Self> {
    let model = model.into();
    if model.trim().is_empty() {
      return Err(SproutError::validation("model must not be empty"));
    }
    Ok(Self { prompt: self.prompt.clone(), image: self.image.clone(), model })
  }

  pub fn prompt(&self) -> &str {
    &self.prompt
  }

  pub fn image(&self) -> Option<&[u8]> {
    self.image.as_deref()
  }

  pub fn model(&self) -> &str {
    &self.model
  }

  /// Build the wire payload: text part first, inline image second
  pub fn to_request(&self) -> GenerateContentRequest {
    let mut parts = vec![Part::Text { text: self.prompt.clone() }];

    if let Some(image) = &self.image {
      parts.push(Part::InlineData {
        inline_data: InlineData { mime_type: IMAGE_MIME_TYPE.to_string(), data: BASE64.encode(image) },
      });
    }

    GenerateContentRequest { contents: vec![Content { parts }] }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use std::collections::HashSet;

  #[test]
  fn test_empty_prompt_is_rejected() {
    let result = RequestJob::text("   ");
    assert!(matches!(result, Err(SproutError::Validation { .. })));
  }

  #[test]
  fn test_empty_model_is_rejected() {
    let result = RequestJob::new("hello", None, "");
    assert!(matches!(result, Err(SproutError::Validation { .. })));
  }

  #[test]
  fn test_text_only_request_has_one_part() {
    let job = RequestJob::text("Generate a care guide").unwrap();
    let value = serde_json::to_value(job.to_request()).unwrap();

    assert_eq!(value, json!({"contents": [{"parts": [{"text": "Generate a care guide"}]}]}));
  }

  #[test]
  fn test_image_request_is_base64_encoded() {
    let job = RequestJob::with_image("Identify", b"hi".to_vec()).unwrap();
    let value = serde_json::to_value(job.to_request()).unwrap();

    assert_eq!(value["contents"][0]["parts"][0]["text"], "Identify");
    assert_eq!(value["contents"][0]["parts"][1]["inline_data"]["data"], "aGk=");
    assert_eq!(value["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/jpeg");
  }

  #[test]
  fn test_for_model_keeps_payload() {
    let job = RequestJob::with_image("Identify", vec![1, 2, 3]).unwrap();
    let other = job.for_model("gemini-pro-vision").unwrap();

    assert_eq!(other.model(), "gemini-pro-vision");
    assert_eq!(other.prompt(), job.prompt());
    assert_eq!(other.image(), Some(&[1u8, 2, 3][..]));
  }

  #[test]
  fn test_slot_indices_are_distinct() {
    let indices: HashSet<usize> = Slot::ALL.iter().map(|slot| slot.index()).collect();
    assert_eq!(indices.len(), 4);
    assert!(indices.iter().all(|index| *index < 4));
  }
}
