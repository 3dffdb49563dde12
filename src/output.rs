//! # Output Module
//!
//! This module centralizes all user-facing output for header-keeper.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Informative by default, more detail with `-v`, silence with `-q`
//! - Stdout stays predictable for piping; failures go to stderr

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::dialect::DialectRegistry;
use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header replaced
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Processing N files..." message.
pub fn print_start_message(file_count: usize, simulate: bool) {
  if is_quiet() {
    return;
  }

  let verb = if simulate { "Simulating" } else { "Processing" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print the per-category lists of changed files.
///
/// In simulate mode the wording says what would happen.
pub fn print_changes(reports: &CategorizedReports, workspace_root: Option<&Path>, simulate: bool) {
  if is_quiet() {
    return;
  }

  let (added, replaced, licensed) = if simulate {
    ("Would add header to", "Would replace header in", "Would replace license in")
  } else {
    ("Added header to", "Replaced header in", "Replaced license in")
  };

  print_file_list(
    &reports.added,
    &symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    added,
    workspace_root,
  );
  print_file_list(
    &reports.header_replaced,
    &symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    replaced,
    workspace_root,
  );
  print_file_list(
    &reports.license_replaced,
    &symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    licensed,
    workspace_root,
  );
}

/// Print every failed file with its error to stderr.
///
/// Failures are never truncated or silenced.
pub fn print_failures(failed: &[&FileReport], workspace_root: Option<&Path>) {
  if failed.is_empty() {
    return;
  }

  eprintln!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    failed.len(),
    plural(failed.len())
  );
  for file in failed {
    eprintln!(
      "  {}: {}",
      make_relative_path(&file.path, workspace_root),
      file.reason.as_deref().unwrap_or("unknown error")
    );
  }
}

/// Print the processing summary.
///
/// Format: "Summary: X changed, Y unchanged, Z skipped, W failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let failed_str = if summary.files_failed > 0 {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  let mut summary_line = format!(
    "Summary: {} changed, {} unchanged, {} skipped, {} failed",
    summary.files_changed().if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.files_unchanged.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.files_skipped.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print the dialect table in classification order.
pub fn print_dialects(registry: &DialectRegistry) {
  for dialect in registry.dialects() {
    println!(
      "{:<14} open={:<6} prefix={:<4} close={:<6} {}",
      dialect.name.if_supports_color(Stream::Stdout, |s| s.bold()),
      quoted(&dialect.block_open),
      quoted(&dialect.line_prefix),
      quoted(&dialect.block_close),
      dialect.patterns.join(",")
    );
  }
}

/// File reports grouped for output.
#[derive(Debug, Default)]
pub struct CategorizedReports<'a> {
  pub added: Vec<&'a FileReport>,
  pub header_replaced: Vec<&'a FileReport>,
  pub license_replaced: Vec<&'a FileReport>,
  pub unchanged: Vec<&'a FileReport>,
  pub skipped: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self::default();

    for report in reports {
      let bucket = match report.action_taken {
        FileAction::Added => &mut categorized.added,
        FileAction::HeaderReplaced => &mut categorized.header_replaced,
        FileAction::LicenseReplaced => &mut categorized.license_replaced,
        FileAction::Unchanged => &mut categorized.unchanged,
        FileAction::Skipped => &mut categorized.skipped,
        FileAction::Failed => &mut categorized.failed,
      };
      bucket.push(report);
    }

    categorized
  }
}

fn print_file_list(files: &[&FileReport], symbol: &str, verb: &str, workspace_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let count = files.len();
  println!("{} {} {} {}:", symbol, verb, count, plural(count));

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, workspace_root));
  }

  if !show_all && count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

fn quoted(token: &str) -> String {
  format!("'{}'", token)
}

/// Make a path relative to the workspace root for display.
fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  let Some(root) = workspace_root else {
    return path.to_string_lossy().to_string();
  };

  if let Ok(relative) = path.strip_prefix(root) {
    return relative.to_string_lossy().to_string();
  }

  match pathdiff::diff_paths(path, root) {
    Some(relative) if path.is_absolute() == root.is_absolute() => relative.to_string_lossy().to_string(),
    _ => path.to_string_lossy().to_string(),
  }
}
