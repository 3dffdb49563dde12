//! # Error Module
//!
//! Errors that can end the processing of a single file. None of them abort a
//! run: the processor records them in the file's report and moves on.

use std::path::PathBuf;

use crate::templates::TemplateError;

/// Failure while processing one file.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The file could not be read as text. No write is attempted.
  #[error("Failed to read file '{}': {source}", path.display())]
  UnreadableFile { path: PathBuf, source: std::io::Error },

  /// The new content could not be written back.
  #[error("Failed to write file '{}': {source}", path.display())]
  WriteFailure { path: PathBuf, source: std::io::Error },

  /// The license or metadata template could not be rendered for the file.
  #[error("Failed to render header for '{}': {source}", path.display())]
  Render { path: PathBuf, source: TemplateError },
}

impl HeaderError {
  /// The file the error refers to.
  pub fn path(&self) -> &std::path::Path {
    match self {
      Self::UnreadableFile { path, .. } | Self::WriteFailure { path, .. } | Self::Render { path, .. } => path,
    }
  }
}
