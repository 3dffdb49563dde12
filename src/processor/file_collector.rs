//! # File Collector Module
//!
//! This module turns user-provided inputs (files, directories, glob
//! patterns) into the sorted, de-duplicated list of files the processor
//! visits, honouring the recursion flag and ignore globs.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File collector for pattern matching and directory traversal.
///
/// The `FileCollector` handles:
/// - Expanding glob patterns into paths
/// - Traversing directories, either fully or one level deep
/// - Skipping hidden entries and ignored paths
#[derive(Debug, Clone)]
pub struct FileCollector {
  /// Descend into subdirectories
  recursive: bool,
  /// Compiled ignore patterns
  ignore: Vec<glob::Pattern>,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `recursive` - Whether directories are walked fully
  /// * `ignore_patterns` - Glob patterns for paths to skip
  ///
  /// # Errors
  ///
  /// Returns an error if an ignore pattern is not a valid glob.
  pub fn new(recursive: bool, ignore_patterns: &[String]) -> Result<Self> {
    let ignore = ignore_patterns
      .iter()
      .map(|pattern| glob::Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self { recursive, ignore })
  }

  /// Collects every file named by `patterns`.
  ///
  /// Each pattern may be a file, a directory or a glob. Files named
  /// explicitly are kept even when hidden; ignore patterns apply to all of
  /// them. The result is sorted and free of duplicates.
  pub fn collect(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
      let path = Path::new(pattern);
      if path.exists() {
        self.collect_path(path, &mut files);
        continue;
      }

      let mut matched = false;
      for entry in glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        match entry {
          Ok(path) => {
            matched = true;
            self.collect_path(&path, &mut files);
          }
          Err(e) => warn!("Cannot access {}: {}", e.path().display(), e.error()),
        }
      }

      if !matched {
        warn!("No files match: {}", pattern);
      }
    }

    files.sort();
    files.dedup();
    debug!("Collected {} files", files.len());
    Ok(files)
  }

  /// Whether `path` matches an ignore pattern.
  ///
  /// A pattern matches the whole path, the file name, or any single
  /// component, so `target` ignores every `target` directory.
  pub fn is_ignored(&self, path: &Path) -> bool {
    let path = normalize(path);
    self.ignore.iter().any(|pattern| {
      pattern.matches_path(&path)
        || path.components().any(|component| match component {
          Component::Normal(name) => pattern.matches(&name.to_string_lossy()),
          _ => false,
        })
    })
  }

  fn collect_path(&self, path: &Path, files: &mut Vec<PathBuf>) {
    if path.is_file() {
      if !self.is_ignored(path) {
        files.push(normalize(path));
      }
      return;
    }

    if path.is_dir() {
      self.traverse_directory(path, files);
    }
  }

  fn traverse_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) {
    debug!("Scanning directory: {}", dir.display());

    let max_depth = if self.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
      .max_depth(max_depth)
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || (!is_hidden(entry.file_name()) && !self.is_ignored(entry.path())));

    for entry in walker {
      match entry {
        Ok(entry) if entry.file_type().is_file() => files.push(normalize(entry.path())),
        Ok(_) => {}
        Err(e) => warn!("Error reading directory entry: {}", e),
      }
    }
  }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
  name.to_string_lossy().starts_with('.')
}

/// Drops `.` components so `./src/a.c` and `src/a.c` are the same path.
fn normalize(path: &Path) -> PathBuf {
  let normalized: PathBuf = path
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .collect();

  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}
