use thiserror::Error;

/// Result type alias using the sprout error taxonomy.
pub type Result<T> = std::result::Result<T, SproutError>;

#[derive(Error, Debug)]
pub enum SproutError {
  /// Network, HTTP status or undecodable response body
  #[error("Inference request failed: {message}")]
  Transport { message: String },

  /// Well-formed response that carried no usable candidate
  #[error("No results found: {message}")]
  Content { message: String },

  /// Bad caller input
  #[error("Validation error: {message}")]
  Validation { message: String },

  #[error("Plant '{name}' not found")]
  NotFound { name: String },

  /// Backing file unreadable, corrupt or unwritable
  #[error("Storage error: {message}")]
  Storage { message: String },
}

impl SproutError {
  pub fn transport(message: impl Into<String>) -> Self {
    Self::Transport { message: message.into() }
  }

  pub fn content(message: impl Into<String>) -> Self {
    Self::Content { message: message.into() }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }

  pub fn not_found(name: impl Into<String>) -> Self {
    Self::NotFound { name: name.into() }
  }

  pub fn storage(message: impl Into<String>) -> Self {
    Self::Storage { message: message.into() }
  }
}

impl From<reqwest::Error> for SproutError {
  fn from(error: reqwest::Error) -> Self {
    // the request URL carries the API key
    let error = error.without_url();
    if error.is_timeout() {
      return Self::transport(format!("request timed out: {error}"));
    }
    Self::transport(error.to_string())
  }
}
