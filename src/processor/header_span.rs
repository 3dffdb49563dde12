//! # Header Span Module
//!
//! Locates the region of a file that holds an existing header.
//!
//! The search runs in two phases. The sentinel markers are found first with
//! plain substring search; the surrounding comment delimiters are then
//! validated line by line, looking back at most [`HEADER_SCAN_WINDOW`] bytes
//! from the start marker. Anything that does not validate yields `None`, and
//! the caller leaves the file untouched.

use std::ops::Range;

use crate::dialect::CommentDialect;
use crate::renderer::{HEADER_END, HEADER_START};

/// How far before the start marker the block opener may be.
pub const HEADER_SCAN_WINDOW: usize = 8 * 1024;

/// Byte positions of the sentinel markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelMarkers {
  /// Offset of the first byte of [`HEADER_START`]
  pub start: usize,
  /// Offset just past the first [`HEADER_END`] that follows the start marker
  pub end: usize,
}

/// Finds the first start marker and the first end marker after it.
pub fn locate_markers(content: &str) -> Option<SentinelMarkers> {
  let start = content.find(HEADER_START)?;
  let after_start = start + HEADER_START.len();
  let end = after_start + content[after_start..].find(HEADER_END)? + HEADER_END.len();
  Some(SentinelMarkers { start, end })
}

/// Span covering only the sentinel-delimited license lines.
///
/// Starts at the beginning of the start marker's line and ends right after
/// the end marker. The start marker's line may hold nothing but the
/// dialect's line prefix before the marker; otherwise the header is treated
/// as malformed.
pub fn find_license_span(content: &str, dialect: &CommentDialect) -> Option<Range<usize>> {
  let markers = locate_markers(content)?;
  let start_line = line_start(content, markers.start);

  let lead = content[start_line..markers.start].trim();
  if !lead.is_empty() && lead != dialect.line_prefix.trim() {
    return None;
  }

  Some(start_line..markers.end)
}

/// Span covering the whole header comment block.
///
/// The block runs from the dialect's opener before the start marker to the
/// closer on the line directly after the end marker.
pub fn find_header_span(content: &str, dialect: &CommentDialect) -> Option<Range<usize>> {
  let markers = locate_markers(content)?;
  let open = find_block_open(content, markers.start, dialect)?;
  let close = find_block_close(content, markers.end, dialect)?;
  Some(open..close)
}

fn find_block_open(content: &str, start_marker: usize, dialect: &CommentDialect) -> Option<usize> {
  let window_floor = start_marker.saturating_sub(HEADER_SCAN_WINDOW);
  let mut begin = line_start(content, start_marker);

  if dialect.is_line_run() {
    // Opener and prefix are the same token: the header is the run of lines
    // carrying it, and the block starts at the top of the run.
    let lead = dialect.comment_lead();
    if lead.is_empty() || !content[begin..].trim_start().starts_with(lead) {
      return None;
    }

    while begin > 0 {
      let previous = line_start(content, begin - 1);
      if previous < window_floor {
        return None;
      }
      if !content[previous..begin].trim_start().starts_with(lead) {
        break;
      }
      begin = previous;
    }
    return Some(begin);
  }

  let open = dialect.block_open.trim();
  loop {
    if begin < window_floor {
      return None;
    }
    if content[begin..line_end(content, begin)].trim_start().starts_with(open) {
      return Some(begin);
    }
    if begin == 0 {
      return None;
    }
    begin = line_start(content, begin - 1);
  }
}

fn find_block_close(content: &str, end_marker: usize, dialect: &CommentDialect) -> Option<usize> {
  let marker_line_end = line_end(content, end_marker);
  if !content[end_marker..marker_line_end].trim().is_empty() {
    return None;
  }

  let close = dialect.block_close.trim();
  if close.is_empty() {
    return Some(end_marker);
  }

  if marker_line_end >= content.len() {
    return None;
  }
  let next_begin = marker_line_end + 1;
  let next_line = &content[next_begin..line_end(content, next_begin)];

  if next_line.trim() == close {
    Some(next_begin + next_line.trim_end().len())
  } else {
    None
  }
}

fn line_start(content: &str, pos: usize) -> usize {
  content[..pos].rfind('\n').map_or(0, |newline| newline + 1)
}

fn line_end(content: &str, pos: usize) -> usize {
  content[pos..].find('\n').map_or(content.len(), |newline| pos + newline)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn c_style() -> CommentDialect {
    CommentDialect::new("C/C++", "/*", "*", "*/", &[".c"])
  }

  fn pound() -> CommentDialect {
    CommentDialect::new("Shell", "#", "#", "#", &[".sh"])
  }

  const C_HEADER: &str = "/*\n* a.c\n*\n* @LICENSE_HEADER_START@\n* old text\n* @LICENSE_HEADER_END@\n*/";

  #[test]
  fn test_locate_markers() {
    let markers = locate_markers(C_HEADER).expect("markers present");
    assert_eq!(&C_HEADER[markers.start..markers.start + HEADER_START.len()], HEADER_START);
    assert!(C_HEADER[..markers.end].ends_with(HEADER_END));

    assert!(locate_markers("no markers here").is_none());
    assert!(locate_markers("* @LICENSE_HEADER_START@\n* never closed").is_none());
    assert!(locate_markers("* @LICENSE_HEADER_END@\n* @LICENSE_HEADER_START@").is_none());
  }

  #[test]
  fn test_header_span_leaves_trailing_content_alone() {
    let content = format!("{C_HEADER}\n\n#include <stdio.h>\n/* trailing */\n");
    let span = find_header_span(&content, &c_style()).expect("span");

    assert_eq!(span, 0..C_HEADER.len());
    assert_eq!(&content[span.end..], "\n\n#include <stdio.h>\n/* trailing */\n");
  }

  #[test]
  fn test_header_span_starts_at_nearest_opener() {
    let content = format!("/* unrelated */\nint x;\n{C_HEADER}\nint y;\n");
    let span = find_header_span(&content, &c_style()).expect("span");

    assert_eq!(&content[span.clone()], C_HEADER);
    assert!(content[..span.start].ends_with("int x;\n"));
  }

  #[test]
  fn test_header_span_pound_run_stops_at_blank_line() {
    let header = "#\n# b.sh\n#\n# @LICENSE_HEADER_START@\n# old\n# @LICENSE_HEADER_END@\n#";
    let content = format!("echo before\n\n{header}\n\necho after\n");
    let span = find_header_span(&content, &pound()).expect("span");

    assert_eq!(&content[span], header);
  }

  #[test]
  fn test_header_span_requires_closer_right_after_end_marker() {
    let content = "/*\n* @LICENSE_HEADER_START@\n* text\n* @LICENSE_HEADER_END@\n* more\n*/\n";
    assert!(find_header_span(content, &c_style()).is_none());

    let trailing = "/*\n* @LICENSE_HEADER_START@\n* text\n* @LICENSE_HEADER_END@ junk\n*/\n";
    assert!(find_header_span(trailing, &c_style()).is_none());
  }

  #[test]
  fn test_header_span_accepts_indented_closer() {
    let content = "/*\n * @LICENSE_HEADER_START@\n * text\n * @LICENSE_HEADER_END@\n */\nint main;";
    let span = find_header_span(content, &c_style()).expect("span");
    assert_eq!(&content[span.end..], "\nint main;");
  }

  #[test]
  fn test_header_span_without_opener_is_none() {
    let content = "* @LICENSE_HEADER_START@\n* text\n* @LICENSE_HEADER_END@\n*/\n";
    assert!(find_header_span(content, &c_style()).is_none());
  }

  #[test]
  fn test_header_span_opener_outside_window() {
    let filler = "* filler line\n".repeat(HEADER_SCAN_WINDOW / 10);
    let content = format!("/*\n{filler}* @LICENSE_HEADER_START@\n* x\n* @LICENSE_HEADER_END@\n*/");
    assert!(find_header_span(&content, &c_style()).is_none());
  }

  #[test]
  fn test_header_span_line_only_dialect() {
    let slashes = CommentDialect::new("Slashes", "", "//", "", &[".rs"]);
    let content = "// @LICENSE_HEADER_START@\n// text\n// @LICENSE_HEADER_END@\n\nfn main() {}\n";
    let span = find_header_span(content, &slashes).expect("span");
    assert_eq!(&content[span.end..], "\n\nfn main() {}\n");
    assert_eq!(span.start, 0);
  }

  #[test]
  fn test_license_span() {
    let span = find_license_span(C_HEADER, &c_style()).expect("span");
    assert_eq!(&C_HEADER[span], "* @LICENSE_HEADER_START@\n* old text\n* @LICENSE_HEADER_END@");
  }

  #[test]
  fn test_license_span_rejects_foreign_lead() {
    let content = "/* @LICENSE_HEADER_START@\n* text\n* @LICENSE_HEADER_END@\n*/";
    assert!(find_license_span(content, &c_style()).is_none());
  }

  #[test]
  fn test_license_span_ignores_delimiters() {
    let content = "  # @LICENSE_HEADER_START@\n  # text\n  # @LICENSE_HEADER_END@";
    let span = find_license_span(content, &pound()).expect("span");
    assert_eq!(span, 0..content.len());
  }
}
