#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use header_keeper::processor::{FileIO, FileStore, Processor, ProcessorConfig, UpdateMode};
use header_keeper::templates::{Author, LicenseData, TemplateManager};

/// License data used throughout the integration tests.
pub fn license_data() -> LicenseData {
  LicenseData {
    license: "Test".to_string(),
    year: "2020".to_string(),
    authors: vec![Author::new("Jane", "2020")],
    company: Some("Acme".to_string()),
  }
}

/// Metadata template used by [`processor`].
pub const METADATA: &str = "Copyright (c) {{year}} {{company}}";

/// A template manager with the given license and metadata templates.
pub fn template_manager(license: &str, metadata: &str) -> TemplateManager {
  let mut manager = TemplateManager::new();
  manager
    .set_license_template("Test", license)
    .expect("valid license template");
  manager.set_metadata_template(metadata).expect("valid metadata template");
  manager
}

/// Builds a processor with the given mode and store.
pub fn processor_with_store(license: &str, mode: UpdateMode, store: Box<dyn FileStore>) -> Processor {
  Processor::new(ProcessorConfig {
    mode,
    file_store: Some(store),
    ..ProcessorConfig::new(template_manager(license, METADATA), license_data())
  })
  .expect("create processor")
}

/// Builds a processor that reads and writes the real filesystem.
pub fn processor(license: &str, mode: UpdateMode) -> Processor {
  processor_with_store(license, mode, Box::new(FileIO::new()))
}

/// A store that reads from disk and records writes instead of performing them.
#[derive(Clone, Default)]
pub struct RecordingStore {
  pub writes: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl RecordingStore {
  pub fn written_paths(&self) -> Vec<PathBuf> {
    self
      .writes
      .lock()
      .expect("lock writes")
      .iter()
      .map(|(path, _)| path.clone())
      .collect()
  }
}

impl FileStore for RecordingStore {
  fn read(&self, path: &Path) -> io::Result<String> {
    FileIO::new().read(path)
  }

  fn write(&self, path: &Path, content: &str) -> io::Result<()> {
    self
      .writes
      .lock()
      .expect("lock writes")
      .push((path.to_path_buf(), content.to_string()));
    Ok(())
  }
}

/// A store whose writes fail for files with the given name.
pub struct FailingWriteStore {
  pub fail_on: String,
}

impl FileStore for FailingWriteStore {
  fn read(&self, path: &Path) -> io::Result<String> {
    FileIO::new().read(path)
  }

  fn write(&self, path: &Path, content: &str) -> io::Result<()> {
    if path.file_name().is_some_and(|name| name == self.fail_on.as_str()) {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only file"));
    }
    FileIO::new().write(path, content)
  }
}
