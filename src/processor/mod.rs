//! # Processor Module
//!
//! This module contains the per-file header engine and the orchestration that
//! runs it over a set of files.
//!
//! The module is organized into several submodules:
//! - [`header_span`] - Locating existing headers via sentinel markers
//! - [`mutator`] - The insert / replace / leave-alone state machine
//! - [`content_transformer`] - Preserved first lines and span replacement
//! - [`file_io`] - The [`FileStore`] seam over the filesystem
//! - [`file_collector`] - File collection, ignore patterns, and directory traversal
//!
//! The [`Processor`] struct is the main entry point. Files are processed one
//! at a time: classify, read, render, mutate, and write only when the content
//! changed. A failure is recorded in that file's report and the run moves on.

mod content_transformer;
mod file_collector;
mod file_io;
mod header_span;
mod mutator;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
pub use content_transformer::ContentTransformer;
pub use file_collector::FileCollector;
pub use file_io::{FileIO, FileStore};
pub use header_span::{HEADER_SCAN_WINDOW, SentinelMarkers, find_header_span, find_license_span, locate_markers};
pub use mutator::{HeaderMutator, Mutation, MutationResult, UnchangedReason, UpdateMode};
use tracing::{debug, trace, warn};

use crate::authors::authors_or;
use crate::dialect::{CommentDialect, DialectRegistry};
use crate::diff::DiffManager;
use crate::error::HeaderError;
use crate::license_detection::{LicenseDetector, SentinelLicenseDetector};
use crate::renderer::{RenderedHeader, render};
use crate::report::{FileAction, FileReport, RunReport};
use crate::templates::{LicenseData, TemplateManager};

/// Reason recorded for files no dialect matches.
pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type";

/// Configuration for creating a Processor instance.
///
/// Built once per run and never modified afterwards.
pub struct ProcessorConfig {
  pub registry: DialectRegistry,
  pub template_manager: TemplateManager,
  pub license_data: LicenseData,

  // Behavior flags
  pub mode: UpdateMode,
  pub simulate: bool,
  pub extract_authors: bool,
  pub recursive: bool,

  // Optional components
  pub ignore_patterns: Vec<String>,
  pub diff_manager: Option<DiffManager>,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
  pub file_store: Option<Box<dyn FileStore>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     simulate: true,
  ///     ..ProcessorConfig::new(template_manager, license_data)
  /// }
  /// ```
  pub fn new(template_manager: TemplateManager, license_data: LicenseData) -> Self {
    Self {
      registry: DialectRegistry::builtin(),
      template_manager,
      license_data,
      mode: UpdateMode::default(),
      simulate: false,
      extract_authors: false,
      recursive: false,
      ignore_patterns: vec![],
      diff_manager: None,
      license_detector: None,
      file_store: None,
    }
  }
}

/// Processor for applying license headers to files.
///
/// The `Processor` is responsible for:
/// - Collecting files from paths, directories and globs
/// - Classifying each file by comment dialect
/// - Rendering the header for each file
/// - Inserting or replacing headers according to the update mode
/// - Writing only files whose content changed
/// - Showing diffs and collecting report data
pub struct Processor {
  /// Comment dialects in classification order
  registry: DialectRegistry,

  /// Template manager for rendering license templates
  template_manager: TemplateManager,

  /// License data (year, authors, company) for rendering templates
  license_data: LicenseData,

  /// Policy for files that already have a license
  mode: UpdateMode,

  /// Compute changes without writing them
  simulate: bool,

  /// Take authors from existing copyright lines
  extract_authors: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,

  /// Per-file state machine
  mutator: HeaderMutator,

  /// Where file content is read from and written to
  file_store: Box<dyn FileStore>,

  /// File collector for pattern matching and directory traversal
  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_collector = FileCollector::new(config.recursive, &config.ignore_patterns)?;

    let license_detector = config
      .license_detector
      .unwrap_or_else(|| Box::new(SentinelLicenseDetector::new()));

    Ok(Self {
      registry: config.registry,
      template_manager: config.template_manager,
      license_data: config.license_data,
      mode: config.mode,
      simulate: config.simulate,
      extract_authors: config.extract_authors,
      diff_manager: config.diff_manager.unwrap_or_default(),
      mutator: HeaderMutator::new(license_detector),
      file_store: config.file_store.unwrap_or_else(|| Box::new(FileIO::new())),
      file_collector,
    })
  }

  /// Processes a list of file or directory patterns.
  ///
  /// This is the main entry point for processing files. It handles:
  /// - Individual files
  /// - Directories (recursively when configured)
  /// - Glob patterns
  ///
  /// # Errors
  ///
  /// Returns an error only if the inputs cannot be expanded (an invalid glob
  /// pattern). Per-file failures are part of the returned report.
  pub fn process(&self, patterns: &[String]) -> Result<RunReport> {
    let files = self.collect_files(patterns)?;
    Ok(self.process_paths(&files))
  }

  /// Expands patterns into the sorted list of files a run would visit.
  pub fn collect_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    self.file_collector.collect(patterns)
  }

  /// Processes the given files in order, continuing past failures.
  pub fn process_paths(&self, paths: &[PathBuf]) -> RunReport {
    let start = Instant::now();
    debug!("Processing {} files", paths.len());

    let reports = paths
      .iter()
      .map(|path| match self.process_file(path) {
        Ok(report) => report,
        Err(e) => {
          warn!("{}", e);
          let dialect = self.registry.classify(path).map(|dialect| dialect.name.as_str());
          FileReport::failed(e.path(), dialect, &e.to_string())
        }
      })
      .collect();

    let report = RunReport::new(reports, start.elapsed());
    debug!(
      "Processed {} files in {}ms",
      paths.len(),
      report.summary.processing_time.as_millis()
    );
    report
  }

  /// Processes one file: classify, read, render, mutate, write if changed.
  ///
  /// Unsupported file types are reported as skipped without being read.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, the templates cannot be
  /// rendered for it, or the new content cannot be written. Nothing is
  /// written when reading or rendering fails.
  pub fn process_file(&self, path: &Path) -> Result<FileReport, HeaderError> {
    let Some(dialect) = self.registry.classify(path) else {
      trace!("Skipping: {} (no dialect matches)", path.display());
      return Ok(FileReport::skipped(path, UNSUPPORTED_FILE_TYPE));
    };
    trace!("Processing {} as {}", path.display(), dialect.name);

    let content = self.file_store.read(path).map_err(|source| HeaderError::UnreadableFile {
      path: path.to_path_buf(),
      source,
    })?;

    let header = self.render_header(path, &content, dialect)?;
    let result = self.mutator.apply(&content, &header, dialect, self.mode);

    let (action_taken, reason) = match result.mutation {
      Mutation::Inserted => (FileAction::Added, None),
      Mutation::HeaderReplaced => (FileAction::HeaderReplaced, None),
      Mutation::LicenseReplaced => (FileAction::LicenseReplaced, None),
      Mutation::Unchanged(why) => (FileAction::Unchanged, Some(why.describe().to_string())),
    };

    let mut written = false;
    if let Some(new_content) = result.content {
      if let Err(e) = self.diff_manager.display_diff(path, &content, &new_content) {
        warn!("Failed to display diff for {}: {}", path.display(), e);
      }

      if self.simulate {
        debug!("Simulate: would write {}", path.display());
      } else {
        self
          .file_store
          .write(path, &new_content)
          .map_err(|source| HeaderError::WriteFailure {
            path: path.to_path_buf(),
            source,
          })?;
        written = true;
        debug!("Wrote {}", path.display());
      }
    } else {
      trace!("Unchanged: {}", path.display());
    }

    Ok(FileReport {
      path: path.to_path_buf(),
      dialect: Some(dialect.name.clone()),
      has_license: result.had_license,
      action_taken,
      written,
      reason,
    })
  }

  fn render_header(&self, path: &Path, content: &str, dialect: &CommentDialect) -> Result<RenderedHeader, HeaderError> {
    let data = if self.extract_authors {
      self
        .license_data
        .with_authors(authors_or(content, &self.license_data.authors))
    } else {
      self.license_data.clone()
    };

    let filename = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    let text = self
      .template_manager
      .render(&data, &filename)
      .map_err(|source| HeaderError::Render {
        path: path.to_path_buf(),
        source,
      })?;

    Ok(render(&text.license, &text.metadata, dialect))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;
  use crate::templates::Author;

  fn processor(mode: UpdateMode, simulate: bool) -> Processor {
    let mut template_manager = TemplateManager::new();
    template_manager
      .set_license_template("Test", "Test license {{year}}")
      .expect("valid template");
    template_manager.set_metadata_template("").expect("valid template");

    let license_data = LicenseData {
      license: "Test".to_string(),
      year: "2025".to_string(),
      authors: vec![Author::new("Jane", "2020")],
      company: Some("Acme".to_string()),
    };

    Processor::new(ProcessorConfig {
      mode,
      simulate,
      ..ProcessorConfig::new(template_manager, license_data)
    })
    .expect("create processor")
  }

  #[test]
  fn test_process_file_inserts_header() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("b.sh");
    fs::write(&path, "echo hi\n").expect("write");

    let report = processor(UpdateMode::ReplaceHeader, false)
      .process_file(&path)
      .expect("process");

    assert_eq!(report.action_taken, FileAction::Added);
    assert!(report.written);
    assert_eq!(report.dialect.as_deref(), Some("Shell"));
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      "#\n# @LICENSE_HEADER_START@\n# Test license 2025\n# @LICENSE_HEADER_END@\n#\n\necho hi\n"
    );
  }

  #[test]
  fn test_process_file_is_idempotent() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("main.c");
    fs::write(&path, "int main(void) { return 0; }\n").expect("write");
    let processor = processor(UpdateMode::ReplaceHeader, false);

    processor.process_file(&path).expect("first pass");
    let first = fs::read_to_string(&path).expect("read");

    let report = processor.process_file(&path).expect("second pass");
    assert_eq!(report.action_taken, FileAction::Unchanged);
    assert!(!report.written);
    assert_eq!(fs::read_to_string(&path).expect("read"), first);
  }

  #[test]
  fn test_process_file_simulate_does_not_write() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.rb");
    fs::write(&path, "puts 1").expect("write");

    let report = processor(UpdateMode::ReplaceHeader, true)
      .process_file(&path)
      .expect("process");

    assert_eq!(report.action_taken, FileAction::Added);
    assert!(!report.written);
    assert_eq!(fs::read_to_string(&path).expect("read"), "puts 1");
  }

  #[test]
  fn test_unsupported_file_is_skipped() {
    let report = processor(UpdateMode::ReplaceHeader, false)
      .process_file(Path::new("/nonexistent/README.md"))
      .expect("skipped, not read");

    assert_eq!(report.action_taken, FileAction::Skipped);
    assert_eq!(report.reason.as_deref(), Some(UNSUPPORTED_FILE_TYPE));
  }

  #[test]
  fn test_missing_file_is_unreadable() {
    let err = processor(UpdateMode::ReplaceHeader, false)
      .process_file(Path::new("/nonexistent/main.c"))
      .expect_err("cannot read");

    assert!(matches!(err, HeaderError::UnreadableFile { .. }));
  }

  #[test]
  fn test_process_paths_continues_after_failure() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let good = temp_dir.path().join("good.c");
    let bad = temp_dir.path().join("bad.c");
    fs::write(&good, "int x;\n").expect("write");
    fs::write(&bad, [0xffu8, 0xfe, 0x00]).expect("write");

    let report = processor(UpdateMode::ReplaceHeader, false).process_paths(&[bad.clone(), good.clone()]);

    assert_eq!(report.files[0].action_taken, FileAction::Failed);
    assert_eq!(report.files[1].action_taken, FileAction::Added);
    assert!(report.has_failures());
    assert_eq!(fs::read(&bad).expect("read"), vec![0xff, 0xfe, 0x00]);
  }

  #[test]
  fn test_extract_authors_feeds_metadata() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("lib.c");
    fs::write(
      &path,
      "/*\n* Copyright (c) 2010 Max Muster\n* @LICENSE_HEADER_START@\n* old\n* @LICENSE_HEADER_END@\n*/\n\nint x;\n",
    )
    .expect("write");

    let mut template_manager = TemplateManager::new();
    template_manager.set_license_template("T", "new").expect("valid template");
    template_manager
      .set_metadata_template("{{copyright}}")
      .expect("valid template");

    let processor = Processor::new(ProcessorConfig {
      extract_authors: true,
      ..ProcessorConfig::new(template_manager, LicenseData::default())
    })
    .expect("create processor");
    let report = processor.process_file(&path).expect("process");

    assert_eq!(report.action_taken, FileAction::HeaderReplaced);
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      "/*\n* Copyright (c) 2010 Max Muster\n* @LICENSE_HEADER_START@\n* new\n* @LICENSE_HEADER_END@\n*/\n\nint x;\n"
    );
  }

  #[test]
  fn test_extract_authors_keeps_dotted_name_up_to_date() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("corp.c");
    let content =
      "/*\n* Copyright (c) 2012-2013 Awesome Limited Inc.\n* @LICENSE_HEADER_START@\n* new\n* @LICENSE_HEADER_END@\n*/\n\nint x;\n";
    fs::write(&path, content).expect("write");

    let mut template_manager = TemplateManager::new();
    template_manager.set_license_template("T", "new").expect("valid template");
    template_manager
      .set_metadata_template("{{copyright}}")
      .expect("valid template");

    let processor = Processor::new(ProcessorConfig {
      extract_authors: true,
      ..ProcessorConfig::new(template_manager, LicenseData::default())
    })
    .expect("create processor");
    let report = processor.process_file(&path).expect("process");

    assert_eq!(report.action_taken, FileAction::Unchanged);
    assert!(!report.written);
    assert_eq!(fs::read_to_string(&path).expect("read"), content);
  }

  #[test]
  fn test_legacy_notice_is_left_alone() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.rb");
    fs::write(&path, "#\n# Copyright (c) 2010 Jane\n#\nputs 1").expect("write");

    let report = processor(UpdateMode::ReplaceHeader, false)
      .process_file(&path)
      .expect("process");

    assert!(report.has_license);
    assert_eq!(report.action_taken, FileAction::Unchanged);
    assert_eq!(
      report.reason.as_deref(),
      Some(UnchangedReason::NoReplaceableSpan.describe())
    );
    assert_eq!(fs::read_to_string(&path).expect("read"), "#\n# Copyright (c) 2010 Jane\n#\nputs 1");
  }
}
