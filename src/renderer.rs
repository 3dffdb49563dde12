//! # Renderer Module
//!
//! This module wraps rendered license and metadata text into the comment
//! syntax of a [`CommentDialect`].
//!
//! Both render shapes bracket the license text with the sentinel markers
//! [`HEADER_START`] and [`HEADER_END`]. The marker lines are prefixed like any
//! other line, but the marker tokens themselves are never altered, so later
//! runs can find them again with a plain substring search.

use crate::dialect::CommentDialect;

/// Marker placed on the line before the license text.
pub const HEADER_START: &str = "@LICENSE_HEADER_START@";

/// Marker placed on the line after the license text.
pub const HEADER_END: &str = "@LICENSE_HEADER_END@";

/// Both shapes of a header rendered for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
  /// Complete comment block: opener, metadata, sentinel-delimited license,
  /// closer. Has no trailing newline.
  pub full: String,

  /// Only the prefixed, sentinel-delimited license lines, without block
  /// delimiters. Has no trailing newline.
  pub license_fragment: String,
}

/// Renders both header shapes for `dialect`.
pub fn render(license_text: &str, metadata_text: &str, dialect: &CommentDialect) -> RenderedHeader {
  RenderedHeader {
    full: render_full(license_text, metadata_text, dialect),
    license_fragment: render_license_fragment(license_text, dialect),
  }
}

/// Renders a complete header comment block.
///
/// The block opener goes on its own line, followed by one prefixed line for
/// every line of `metadata_text`, the start marker, one prefixed line for
/// every line of `license_text`, the end marker and finally the block closer.
/// Empty openers and closers produce no line at all.
///
/// # Parameters
///
/// * `license_text` - Rendered license body
/// * `metadata_text` - Rendered file metadata (file name, copyright lines)
/// * `dialect` - Comment syntax to wrap the text in
pub fn render_full(license_text: &str, metadata_text: &str, dialect: &CommentDialect) -> String {
  let mut lines = Vec::new();

  if !dialect.block_open.is_empty() {
    lines.push(dialect.block_open.clone());
  }

  lines.extend(metadata_text.lines().map(|line| prefix_line(line, dialect)));
  lines.extend(sentinel_lines(license_text).map(|line| prefix_line(line, dialect)));

  if !dialect.block_close.is_empty() {
    lines.push(dialect.block_close.clone());
  }

  lines.join("\n")
}

/// Renders only the sentinel-delimited license lines.
///
/// Used when just the license inside an existing header gets replaced and the
/// surrounding metadata must survive.
pub fn render_license_fragment(license_text: &str, dialect: &CommentDialect) -> String {
  sentinel_lines(license_text)
    .map(|line| prefix_line(line, dialect))
    .collect::<Vec<_>>()
    .join("\n")
}

fn sentinel_lines(license_text: &str) -> impl Iterator<Item = &str> {
  std::iter::once(HEADER_START)
    .chain(license_text.lines())
    .chain(std::iter::once(HEADER_END))
}

fn prefix_line(line: &str, dialect: &CommentDialect) -> String {
  if line.is_empty() {
    // No trailing whitespace on blank comment lines
    dialect.line_prefix.trim_end().to_string()
  } else {
    format!("{} {}", dialect.line_prefix, line)
  }
}
