//! # Dialect Module
//!
//! This module contains the comment dialect registry: an ordered table that
//! maps file name suffixes to the comment syntax used for headers in those
//! files.
//!
//! Classification walks the table in declaration order and the first dialect
//! with a matching suffix wins, so an ambiguous suffix is resolved by putting
//! the preferred dialect earlier in the list.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use header_keeper::dialect::DialectRegistry;
//!
//! let registry = DialectRegistry::builtin();
//!
//! let dialect = registry.classify(Path::new("src/main.cpp")).expect("C++ is built in");
//! assert_eq!(dialect.name, "C/C++");
//!
//! assert!(registry.classify(Path::new("README.md")).is_none());
//! ```

use std::path::Path;

use serde::Deserialize;

/// Comment syntax for one family of file types.
///
/// `block_open` and `block_close` may be empty for line-comment-only
/// dialects. `line_prefix` is only ever used to prefix rendered lines, never
/// to open or close a block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommentDialect {
  /// Human readable dialect name (e.g. "C/C++")
  pub name: String,

  /// Line that opens the header comment block (e.g. "/*")
  #[serde(default)]
  pub block_open: String,

  /// Prefix for every line inside the header (e.g. "*")
  #[serde(default)]
  pub line_prefix: String,

  /// Line that closes the header comment block (e.g. "*/")
  #[serde(default)]
  pub block_close: String,

  /// Case-sensitive suffixes or exact file names this dialect applies to
  pub patterns: Vec<String>,
}

impl CommentDialect {
  /// Creates a dialect from string slices.
  pub fn new(name: &str, block_open: &str, line_prefix: &str, block_close: &str, patterns: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      block_open: block_open.to_string(),
      line_prefix: line_prefix.to_string(),
      block_close: block_close.to_string(),
      patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
    }
  }

  /// Returns `true` if `path` ends with any of this dialect's patterns.
  pub fn matches(&self, path: &str) -> bool {
    self
      .patterns
      .iter()
      .any(|pattern| !pattern.is_empty() && path.ends_with(pattern.as_str()))
  }

  /// The token that starts every line belonging to the header comment.
  ///
  /// For dialects like `#` where the block opener doubles as the line prefix,
  /// the header is a run of lines sharing this token.
  pub fn comment_lead(&self) -> &str {
    let prefix = self.line_prefix.trim();
    if prefix.is_empty() { self.block_open.trim() } else { prefix }
  }

  /// Whether the header is a contiguous run of prefixed lines rather than a
  /// block with a distinct opener.
  pub fn is_line_run(&self) -> bool {
    let open = self.block_open.trim();
    open.is_empty() || open == self.line_prefix.trim()
  }
}

/// The dialects shipped with the tool, in classification order.
pub fn builtin_dialects() -> Vec<CommentDialect> {
  vec![
    CommentDialect::new("C/C++", "/*", "*", "*/", &[".h", ".cc", ".c", ".cxx", ".cpp"]),
    CommentDialect::new("Ruby", "#", "#", "#", &[".rb"]),
    CommentDialect::new("Shell", "#", "#", "#", &[".sh", ".bash", ".command"]),
    CommentDialect::new("XML", "<!--", "", "-->", &[".xml", ".ui"]),
    CommentDialect::new("Build-config", "#", "#", "#", &["CMakeLists.txt", ".cmake"]),
    CommentDialect::new("Python", "#", "#", "#", &[".py"]),
    CommentDialect::new("Java", "/*", "*", "*/", &[".java", ".hpp", ".hxx"]),
  ]
}

/// Ordered registry of comment dialects.
///
/// The registry is plain data: adding a dialect never requires touching the
/// renderer or the mutator.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
  dialects: Vec<CommentDialect>,
}

impl Default for DialectRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

impl DialectRegistry {
  /// Creates a registry holding exactly the given dialects, in order.
  pub const fn new(dialects: Vec<CommentDialect>) -> Self {
    Self { dialects }
  }

  /// Creates a registry holding the built-in dialects.
  pub fn builtin() -> Self {
    Self::new(builtin_dialects())
  }

  /// Creates a registry where `custom` dialects take precedence over the
  /// built-in ones.
  pub fn with_custom(custom: Vec<CommentDialect>) -> Self {
    let mut dialects = custom;
    dialects.extend(builtin_dialects());
    Self::new(dialects)
  }

  /// Appends a dialect at the lowest precedence.
  pub fn register(&mut self, dialect: CommentDialect) {
    self.dialects.push(dialect);
  }

  /// All dialects in classification order.
  pub fn dialects(&self) -> &[CommentDialect] {
    &self.dialects
  }

  /// Finds the dialect for `path`.
  ///
  /// Matching is an exact, case-sensitive suffix test against the whole
  /// path. `None` means the file type is unsupported and the file must be
  /// skipped.
  pub fn classify(&self, path: &Path) -> Option<&CommentDialect> {
    let path = path.to_string_lossy();
    self.dialects.iter().find(|dialect| dialect.matches(&path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classify_name(registry: &DialectRegistry, path: &str) -> Option<String> {
    registry.classify(Path::new(path)).map(|d| d.name.clone())
  }

  #[test]
  fn test_builtin_classification() {
    let registry = DialectRegistry::builtin();

    assert_eq!(classify_name(&registry, "foo.cpp").as_deref(), Some("C/C++"));
    assert_eq!(classify_name(&registry, "include/foo.h").as_deref(), Some("C/C++"));
    assert_eq!(classify_name(&registry, "lib/a.rb").as_deref(), Some("Ruby"));
    assert_eq!(classify_name(&registry, "run.sh").as_deref(), Some("Shell"));
    assert_eq!(classify_name(&registry, "setup.bash").as_deref(), Some("Shell"));
    assert_eq!(classify_name(&registry, "Launch.command").as_deref(), Some("Shell"));
    assert_eq!(classify_name(&registry, "form.ui").as_deref(), Some("XML"));
    assert_eq!(classify_name(&registry, "CMakeLists.txt").as_deref(), Some("Build-config"));
    assert_eq!(classify_name(&registry, "cmake/Find.cmake").as_deref(), Some("Build-config"));
    assert_eq!(classify_name(&registry, "README.md"), None);
  }

  #[test]
  fn test_classification_is_case_sensitive() {
    let registry = DialectRegistry::builtin();

    assert_eq!(classify_name(&registry, "FOO.CPP"), None);
    assert_eq!(classify_name(&registry, "cmakelists.txt"), None);
    assert_eq!(classify_name(&registry, "notes.txt"), None);
  }

  #[test]
  fn test_first_match_wins() {
    let registry = DialectRegistry::new(vec![
      CommentDialect::new("First", "#", "#", "#", &[".conf"]),
      CommentDialect::new("Second", "//", "//", "//", &[".conf"]),
    ]);

    assert_eq!(classify_name(&registry, "app.conf").as_deref(), Some("First"));
  }

  #[test]
  fn test_custom_dialects_override_builtins() {
    let registry = DialectRegistry::with_custom(vec![CommentDialect::new("Header", "//", "//", "", &[".h"])]);

    assert_eq!(classify_name(&registry, "a.h").as_deref(), Some("Header"));
    assert_eq!(classify_name(&registry, "a.c").as_deref(), Some("C/C++"));
  }

  #[test]
  fn test_register_appends_at_lowest_precedence() {
    let mut registry = DialectRegistry::builtin();
    registry.register(CommentDialect::new("Markdown", "<!--", "", "-->", &[".md"]));

    assert_eq!(classify_name(&registry, "README.md").as_deref(), Some("Markdown"));
    assert_eq!(registry.dialects().last().map(|d| d.name.as_str()), Some("Markdown"));
  }

  #[test]
  fn test_empty_pattern_never_matches() {
    let registry = DialectRegistry::new(vec![CommentDialect::new("Broken", "#", "#", "#", &[""])]);
    assert_eq!(classify_name(&registry, "anything.rs"), None);
  }

  #[test]
  fn test_comment_lead_and_line_run() {
    let c = CommentDialect::new("C", "/*", "*", "*/", &[".c"]);
    assert_eq!(c.comment_lead(), "*");
    assert!(!c.is_line_run());

    let pound = CommentDialect::new("Pound", "#", "#", "#", &[".sh"]);
    assert_eq!(pound.comment_lead(), "#");
    assert!(pound.is_line_run());

    let line_only = CommentDialect::new("Slashes", "", "//", "", &[".rs"]);
    assert_eq!(line_only.comment_lead(), "//");
    assert!(line_only.is_line_run());

    let xml = CommentDialect::new("XML", "<!--", "", "-->", &[".xml"]);
    assert_eq!(xml.comment_lead(), "<!--");
    assert!(!xml.is_line_run());
  }
}
