//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license
//! detection. It allows for replacing the detection algorithm without
//! modifying the processor.

use std::sync::LazyLock;

use regex::Regex;

use crate::renderer::HEADER_START;

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a file
/// already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  ///
  /// # Parameters
  ///
  /// * `content` - The file content to check
  ///
  /// # Returns
  ///
  /// `true` if the content appears to have a license header, `false` otherwise.
  fn has_license(&self, content: &str) -> bool;
}

static COPYRIGHT_NOTICE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Copyright[ \t]*\([cC]\)").expect("copyright notice regex must compile"));

/// Default implementation of license detection.
///
/// A file has a license when it contains the [`HEADER_START`] marker or an
/// informal `Copyright (c)` notice. The latter catches legacy files that
/// carry a notice but no sentinel-delimited header; those count as licensed,
/// so they are never given a second header.
pub struct SentinelLicenseDetector;

impl SentinelLicenseDetector {
  pub const fn new() -> Self {
    SentinelLicenseDetector
  }
}

impl Default for SentinelLicenseDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl LicenseDetector for SentinelLicenseDetector {
  fn has_license(&self, content: &str) -> bool {
    content.contains(HEADER_START) || COPYRIGHT_NOTICE_REGEX.is_match(content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sentinel_license_detector() {
    let detector = SentinelLicenseDetector::new();

    // Structured header
    assert!(detector.has_license("#\n# @LICENSE_HEADER_START@\n# text\n# @LICENSE_HEADER_END@\n#\n"));

    // Informal notice
    assert!(detector.has_license("#\n# Copyright (c) 2010 Jane\n#\nputs 1"));
    assert!(detector.has_license("/* Copyright (C) 2024 Test Company */\n\nint main() {}"));

    // Only the capitalised word counts
    assert!(!detector.has_license("/* COPYRIGHT (C) 2024 Test Company */\n\nint main() {}"));
    assert!(!detector.has_license("// copyright (c) 2024 Test Company\n"));

    // The word alone is not enough
    assert!(!detector.has_license("// Copyright 2024 Test Company\nfn main() {}"));
    assert!(!detector.has_license("int main() {\n  return 0;\n}"));
  }

  #[test]
  fn test_detection_scans_whole_content() {
    let detector = SentinelLicenseDetector::new();
    let content = format!("{}\n# Copyright (c) 2020 Late Notice\n", "x = 1\n".repeat(5000));
    assert!(detector.has_license(&content));
  }
}
