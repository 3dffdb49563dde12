//! # File I/O Module
//!
//! This module provides the file reading and writing seam used by the
//! processor. Everything above it works on strings; only [`FileStore`]
//! implementations touch the filesystem, so tests can swap in a double that
//! records or rejects writes.

use std::io;
use std::path::Path;

/// Reads and writes whole files as text.
pub trait FileStore: Send + Sync {
  /// Reads the complete content of `path` as UTF-8.
  ///
  /// Files that are not valid UTF-8 yield an [`io::ErrorKind::InvalidData`]
  /// error.
  fn read(&self, path: &Path) -> io::Result<String>;

  /// Replaces the content of `path` with `content`.
  fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// File I/O operations for the processor, backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileIO;

impl FileIO {
  pub const fn new() -> Self {
    Self
  }
}

impl FileStore for FileIO {
  fn read(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &str) -> io::Result<()> {
    std::fs::write(path, content)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_read_write_roundtrip_on_disk() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.sh");

    FileIO::new().write(&path, "echo hi\n").expect("write");
    assert_eq!(FileIO::new().read(&path).expect("read"), "echo hi\n");
  }

  #[test]
  fn test_read_invalid_utf8_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("binary.c");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).expect("write bytes");

    let err = FileIO::new().read(&path).expect_err("not utf-8");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
  }

  #[test]
  fn test_read_missing_file() {
    let err = FileIO::new().read(Path::new("/nonexistent/file.c")).expect_err("missing");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }
}
