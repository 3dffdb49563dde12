//! # Report Module
//!
//! This module records what happened to every file in a run and can write
//! that record as JSON or CSV.
//!
//! It captures information about each processed file, including its dialect,
//! license status, the action taken and why, and summarises the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Name of the comment dialect, if the file type is supported
  pub dialect: Option<String>,
  /// Whether the file had a license before processing
  pub has_license: bool,
  /// Action taken on the file
  pub action_taken: FileAction,
  /// Whether new content was written to disk
  pub written: bool,
  /// Why the file was skipped, left unchanged or failed
  pub reason: Option<String>,
}

impl FileReport {
  /// Report for a file that was not touched because of `reason`.
  pub fn skipped(path: &Path, reason: &str) -> Self {
    Self {
      path: path.to_path_buf(),
      dialect: None,
      has_license: false,
      action_taken: FileAction::Skipped,
      written: false,
      reason: Some(reason.to_string()),
    }
  }

  /// Report for a file whose processing failed.
  pub fn failed(path: &Path, dialect: Option<&str>, error: &str) -> Self {
    Self {
      path: path.to_path_buf(),
      dialect: dialect.map(str::to_string),
      has_license: false,
      action_taken: FileAction::Failed,
      written: false,
      reason: Some(error.to_string()),
    }
  }
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// A header was inserted
  Added,
  /// The whole existing header was replaced
  HeaderReplaced,
  /// Only the license text inside the header was replaced
  LicenseReplaced,
  /// The file already had what it needed, or had no replaceable span
  Unchanged,
  /// The file was not processed (unsupported type)
  Skipped,
  /// Reading, rendering or writing failed
  Failed,
}

impl FileAction {
  pub const fn label(self) -> &'static str {
    match self {
      FileAction::Added => "Added",
      FileAction::HeaderReplaced => "Header replaced",
      FileAction::LicenseReplaced => "License replaced",
      FileAction::Unchanged => "Unchanged",
      FileAction::Skipped => "Skipped",
      FileAction::Failed => "Failed",
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files visited
  pub total_files: usize,
  /// Number of files that already had a license
  pub files_with_license: usize,
  /// Number of files without a license
  pub files_without_license: usize,
  /// Number of headers inserted
  pub headers_added: usize,
  /// Number of full headers replaced
  pub headers_replaced: usize,
  /// Number of license texts replaced
  pub licenses_replaced: usize,
  /// Number of files left unchanged
  pub files_unchanged: usize,
  /// Number of unsupported files skipped
  pub files_skipped: usize,
  /// Number of files that failed
  pub files_failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };

    for file in files {
      match file.action_taken {
        FileAction::Skipped => {
          summary.files_skipped += 1;
          continue;
        }
        FileAction::Failed => {
          summary.files_failed += 1;
          continue;
        }
        FileAction::Added => summary.headers_added += 1,
        FileAction::HeaderReplaced => summary.headers_replaced += 1,
        FileAction::LicenseReplaced => summary.licenses_replaced += 1,
        FileAction::Unchanged => summary.files_unchanged += 1,
      }

      if file.has_license {
        summary.files_with_license += 1;
      } else {
        summary.files_without_license += 1;
      }
    }

    summary
  }

  /// Number of files whose content changed (or would change in simulate mode).
  pub const fn files_changed(&self) -> usize {
    self.headers_added + self.headers_replaced + self.licenses_replaced
  }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
  /// One report per visited file, in processing order
  pub files: Vec<FileReport>,
  /// Aggregated counts
  pub summary: ProcessingSummary,
}

impl RunReport {
  pub fn new(files: Vec<FileReport>, processing_time: Duration) -> Self {
    let summary = ProcessingSummary::from_reports(&files, processing_time);
    Self { files, summary }
  }

  /// Reports of the files that failed.
  pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
    self
      .files
      .iter()
      .filter(|file| file.action_taken == FileAction::Failed)
  }

  pub fn has_failures(&self) -> bool {
    self.summary.files_failed > 0
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Report Generator for creating run reports
pub struct ReportGenerator<'a> {
  /// Format of the report to generate
  format: ReportFormat,
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Create a new report generator
  ///
  /// # Parameters
  ///
  /// * `format` - The format to use for the report
  /// * `output_path` - The path where the report will be saved
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Generate a report and write it to the output path
  pub fn generate(&self, report: &RunReport) -> Result<()> {
    let content = self.render(report)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  /// Render the report content without writing it
  pub fn render(&self, report: &RunReport) -> Result<String> {
    match self.format {
      ReportFormat::Json => self.generate_json(report),
      ReportFormat::Csv => Ok(self.generate_csv(report)),
    }
  }

  fn generate_json(&self, report: &RunReport) -> Result<String> {
    let value = serde_json::json!({
      "generated_at": Local::now().to_rfc3339(),
      "summary": report.summary,
      "files": report.files,
    });

    serde_json::to_string_pretty(&value).context("Failed to serialize JSON report")
  }

  fn generate_csv(&self, report: &RunReport) -> String {
    let mut csv = String::new();

    csv.push_str("file_path,dialect,has_license,action_taken,written,notes\n");

    for file in &report.files {
      csv.push_str(&format!(
        "{},{},{},{},{},{}\n",
        escape_csv(&file.path.to_string_lossy()),
        escape_csv(file.dialect.as_deref().unwrap_or("")),
        file.has_license,
        file.action_taken.label(),
        file.written,
        escape_csv(file.reason.as_deref().unwrap_or("")),
      ));
    }

    let summary = &report.summary;
    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Total files,{}\n", summary.total_files));
    csv.push_str(&format!("Files with license,{}\n", summary.files_with_license));
    csv.push_str(&format!("Files without license,{}\n", summary.files_without_license));
    csv.push_str(&format!("Headers added,{}\n", summary.headers_added));
    csv.push_str(&format!("Headers replaced,{}\n", summary.headers_replaced));
    csv.push_str(&format!("Licenses replaced,{}\n", summary.licenses_replaced));
    csv.push_str(&format!("Unchanged,{}\n", summary.files_unchanged));
    csv.push_str(&format!("Skipped,{}\n", summary.files_skipped));
    csv.push_str(&format!("Failed,{}\n", summary.files_failed));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.processing_time.as_secs_f64()
    ));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    csv
  }
}

/// Quotes a CSV field when it contains a separator, quote or newline.
fn escape_csv(field: &str) -> String {
  if field.contains([',', '"', '\n']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_string()
  }
}
