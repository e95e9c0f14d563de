use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SproutError};

/// Write a result text to `path`, creating missing parent directories.
/// An existing file is overwritten.
pub fn save_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
  let path = path.as_ref();

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    fs::create_dir_all(parent)
      .map_err(|e| SproutError::storage(format!("failed to create {}: {e}", parent.display())))?;
  }

  fs::write(path, text).map_err(|e| SproutError::storage(format!("failed to write {}: {e}", path.display())))?;

  debug!(path = %path.display(), bytes = text.len(), "saved result text");
  Ok(())
}
