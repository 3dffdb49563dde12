//! # Content Transformer Module
//!
//! This module provides the string surgery used by the mutator: keeping
//! special first lines (shebangs, XML declarations, etc.) in place, inserting
//! a header, and swapping a span for new text.

use std::ops::Range;

/// First lines that must stay first, matched case-insensitively.
const PRESERVED_PREFIXES: &[&str] = &[
  "#!",                       // shebang
  "<?xml",                    // XML declaration
  "<!doctype",                // HTML doctype
  "# encoding:",              // Ruby encoding
  "# frozen_string_literal:", // Ruby interpreter instruction
  "# -*-",                    // Emacs/Python coding line
  "<?php",                    // PHP opening tag
];

/// Content transformation utilities for header processing.
#[derive(Debug, Default)]
pub struct ContentTransformer;

impl ContentTransformer {
  pub const fn new() -> Self {
    Self
  }

  /// Splits off a first line that must stay above any header.
  ///
  /// # Returns
  ///
  /// A tuple containing:
  /// - The preserved line exactly as in the file, including its newline if any (empty when there is none)
  /// - The remaining content
  pub fn split_prefix<'a>(&self, content: &'a str) -> (&'a str, &'a str) {
    let first_line_end = content.find('\n').map_or(content.len(), |newline| newline + 1);
    let first_line = content[..first_line_end].to_lowercase();

    if PRESERVED_PREFIXES.iter().any(|prefix| first_line.starts_with(prefix)) {
      content.split_at(first_line_end)
    } else {
      ("", content)
    }
  }

  /// Puts `header` above `content`, separated by one blank line.
  ///
  /// A preserved first line stays on top, followed by a blank line and the
  /// header. Otherwise the result is exactly `header + "\n\n" + content`.
  pub fn insert_header(&self, content: &str, header: &str) -> String {
    let (prefix, rest) = self.split_prefix(content);
    if prefix.is_empty() {
      return format!("{header}\n\n{content}");
    }

    let mut result = String::with_capacity(content.len() + header.len() + 4);
    result.push_str(prefix);
    if !prefix.ends_with('\n') {
      result.push('\n');
    }
    result.push('\n');
    result.push_str(header);
    result.push_str("\n\n");
    result.push_str(rest);
    result
  }

  /// Returns `content` with `span` replaced by `replacement`.
  pub fn replace_span(&self, content: &str, span: Range<usize>, replacement: &str) -> String {
    let mut result = String::with_capacity(content.len() - span.len() + replacement.len());
    result.push_str(&content[..span.start]);
    result.push_str(replacement);
    result.push_str(&content[span.end..]);
    result
  }
}
