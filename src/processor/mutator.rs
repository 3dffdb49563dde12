//! # Mutator Module
//!
//! The per-file state machine. Given a file's content and its rendered
//! header, the mutator decides between inserting a header, replacing the
//! whole existing header, replacing only the license inside it, or leaving
//! the file alone, and computes the new content.
//!
//! The mutator never touches the filesystem. It reports whether the content
//! changed so the caller can skip writing files that are already up to date.

use std::ops::Range;

use serde::Deserialize;
use tracing::debug;

use super::content_transformer::ContentTransformer;
use super::header_span::{find_header_span, find_license_span};
use crate::dialect::CommentDialect;
use crate::license_detection::{LicenseDetector, SentinelLicenseDetector};
use crate::renderer::RenderedHeader;

/// What to do with files that already have a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateMode {
  /// Replace the whole header block
  #[default]
  ReplaceHeader,
  /// Replace only the sentinel-delimited license text
  LicenseOnly,
  /// Leave files with a license untouched
  MissingOnly,
}

/// Why a file was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
  /// The replacement produced identical content
  UpToDate,
  /// A license exists and the mode only adds missing headers
  HeaderPresent,
  /// A license was detected but no replaceable span was found
  NoReplaceableSpan,
}

impl UnchangedReason {
  pub const fn describe(self) -> &'static str {
    match self {
      Self::UpToDate => "Header already up to date",
      Self::HeaderPresent => "Header present (missing-only mode)",
      Self::NoReplaceableSpan => "License notice without a replaceable header span",
    }
  }
}

/// The transition taken for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
  Inserted,
  HeaderReplaced,
  LicenseReplaced,
  Unchanged(UnchangedReason),
}

/// Outcome of applying a header to a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
  /// Whether the content had a license before
  pub had_license: bool,
  /// The transition taken
  pub mutation: Mutation,
  /// New content; `None` whenever it would equal the original
  pub content: Option<String>,
}

impl MutationResult {
  const fn unchanged(had_license: bool, reason: UnchangedReason) -> Self {
    Self {
      had_license,
      mutation: Mutation::Unchanged(reason),
      content: None,
    }
  }

  pub const fn is_changed(&self) -> bool {
    self.content.is_some()
  }
}

/// Applies rendered headers to file content.
pub struct HeaderMutator {
  detector: Box<dyn LicenseDetector>,
  transformer: ContentTransformer,
}

impl Default for HeaderMutator {
  fn default() -> Self {
    Self::new(Box::new(SentinelLicenseDetector::new()))
  }
}

impl HeaderMutator {
  pub fn new(detector: Box<dyn LicenseDetector>) -> Self {
    Self {
      detector,
      transformer: ContentTransformer::new(),
    }
  }

  pub fn has_license(&self, content: &str) -> bool {
    self.detector.has_license(content)
  }

  /// Computes the new content for a file.
  ///
  /// # Parameters
  ///
  /// * `content` - The file's current content
  /// * `header` - Header rendered for this file
  /// * `dialect` - The file's comment dialect
  /// * `mode` - Policy for files that already have a license
  pub fn apply(
    &self,
    content: &str,
    header: &RenderedHeader,
    dialect: &CommentDialect,
    mode: UpdateMode,
  ) -> MutationResult {
    if !self.has_license(content) {
      return MutationResult {
        had_license: false,
        mutation: Mutation::Inserted,
        content: Some(self.transformer.insert_header(content, &header.full)),
      };
    }

    match mode {
      UpdateMode::MissingOnly => MutationResult::unchanged(true, UnchangedReason::HeaderPresent),
      UpdateMode::ReplaceHeader => self.replace(
        content,
        find_header_span(self.body(content), dialect),
        &header.full,
        Mutation::HeaderReplaced,
      ),
      UpdateMode::LicenseOnly => self.replace(
        content,
        find_license_span(self.body(content), dialect),
        &header.license_fragment,
        Mutation::LicenseReplaced,
      ),
    }
  }

  /// Content below a preserved first line; spans are searched here only.
  fn body<'a>(&self, content: &'a str) -> &'a str {
    self.transformer.split_prefix(content).1
  }

  fn replace(&self, content: &str, span: Option<Range<usize>>, replacement: &str, mutation: Mutation) -> MutationResult {
    let Some(span) = span else {
      debug!("No replaceable header span found, leaving content unchanged");
      return MutationResult::unchanged(true, UnchangedReason::NoReplaceableSpan);
    };

    let offset = content.len() - self.body(content).len();
    let span = span.start + offset..span.end + offset;

    let updated = self.transformer.replace_span(content, span, replacement);
    if updated == content {
      MutationResult::unchanged(true, UnchangedReason::UpToDate)
    } else {
      MutationResult {
        had_license: true,
        mutation,
        content: Some(updated),
      }
    }
  }
}
