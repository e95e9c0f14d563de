//! Runtime configuration for the inference client and the plant database.
//!
//! Values come from CLI flags with environment fallbacks; the API key is never
//! baked into the binary.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DATABASE_FILE_NAME: &str = "plant_database.json";

/// Configuration for the generative model client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Scheme and host of the inference API (e.g., "https://generativelanguage.googleapis.com")
  pub base_url: String,
  /// API key appended as the `key` query parameter
  pub api_key: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(), api_key: String::new(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

impl ClientConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Endpoint for one model, without the key parameter
  pub fn endpoint(&self, model: &str) -> String {
    format!("{}/v1beta/models/{}:generateContent", self.base_url.trim_end_matches('/'), model)
  }
}

/// Get the default plant database path (~/.sprout/plant_database.json)
pub fn default_database_path() -> PathBuf {
  dirs::home_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join(".sprout")
    .join(DATABASE_FILE_NAME)
}
