//! Prompt builders for each slot

use crate::error::{Result, SproutError};
use crate::inference::job::RequestJob;

pub const IDENTIFY_PROMPT: &str = "Identify this plant and provide detailed information about it, including its scientific name, common names, care instructions, and any interesting facts.";

pub const DISEASE_PROMPT: &str = "Analyze this plant image and identify any visible diseases or pests. Provide a detailed description of the issue, potential causes, and recommended treatments.";

/// Languages offered for translating a result
pub const LANGUAGES: [&str; 4] = ["English", "Spanish", "French", "German"];

pub fn care_guide_prompt(plant_name: &str) -> Result<String> {
  let plant_name = plant_name.trim();
  if plant_name.is_empty() {
    return Err(SproutError::validation("please enter a plant name"));
  }
  Ok(format!(
    "Generate a detailed care guide for {plant_name}, including watering needs, sunlight requirements, soil type, fertilization, and common issues."
  ))
}

pub fn translate_prompt(language: &str, text: &str) -> Result<String> {
  if language.trim().is_empty() {
    return Err(SproutError::validation("target language must not be empty"));
  }
  if text.trim().is_empty() {
    return Err(SproutError::validation("nothing to translate"));
  }
  Ok(format!("Translate the following text to {}:\n\n{}", language.trim(), text))
}

pub fn identify_job(image: Vec<u8>, model: &str) -> Result<RequestJob> {
  RequestJob::new(IDENTIFY_PROMPT, Some(require_image(image)?), model)
}

pub fn disease_job(image: Vec<u8>, model: &str) -> Result<RequestJob> {
  RequestJob::new(DISEASE_PROMPT, Some(require_image(image)?), model)
}

pub fn care_guide_job(plant_name: &str, model: &str) -> Result<RequestJob> {
  RequestJob::new(care_guide_prompt(plant_name)?, None, model)
}

pub fn translate_job(language: &str, text: &str, model: &str) -> Result<RequestJob> {
  RequestJob::new(translate_prompt(language, text)?, None, model)
}

fn require_image(image: Vec<u8>) -> Result<Vec<u8>> {
  if image.is_empty() {
    return Err(SproutError::validation("please upload an image first"));
  }
  Ok(image)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_care_guide_prompt_mentions_plant() {
    let prompt = care_guide_prompt("  Basil ").unwrap();
    assert!(prompt.starts_with("Generate a detailed care guide for Basil,"));
  }

  #[test]
  fn test_care_guide_requires_name() {
    assert!(matches!(care_guide_prompt(""), Err(SproutError::Validation { .. })));
  }

  #[test]
  fn test_translate_prompt_layout() {
    let prompt = translate_prompt("Spanish", "Water weekly.").unwrap();
    assert_eq!(prompt, "Translate the following text to Spanish:\n\nWater weekly.");
  }

  #[test]
  fn test_translate_requires_text() {
    assert!(translate_prompt("French", " ").is_err());
  }

  #[test]
  fn test_disease_job_requires_image() {
    let result = disease_job(Vec::new(), "gemini-1.5-flash-latest");
    assert!(matches!(result, Err(SproutError::Validation { .. })));
  }

  #[test]
  fn test_identify_job_carries_image() {
    let job = identify_job(vec![0xFF, 0xD8], "gemini-1.5-flash-latest").unwrap();
    assert_eq!(job.prompt(), IDENTIFY_PROMPT);
    assert!(job.image().is_some());
  }
}
