//! # Templates Module
//!
//! This module provides functionality for managing license templates and
//! rendering them with specific data (authors, company, year).
//!
//! Two templates are rendered for every file:
//! - the license body, which ends up between the sentinel markers
//! - the metadata header (file name, copyright lines), which sits above it
//!
//! Templates are plain text with `{{variable}}` placeholders. The supported
//! variables are `year`, `company`, `license`, `filename`, `authors` and
//! `copyright`.
//!
//! ## Example
//!
//! ```rust
//! use header_keeper::templates::{Author, LicenseData, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let manager = TemplateManager::builtin("MIT")?;
//!
//! let data = LicenseData {
//!   license: manager.license_name().to_string(),
//!   year: "2025".to_string(),
//!   authors: vec![Author::new("Jane Doe", "2025")],
//!   company: None,
//! };
//!
//! let text = manager.render(&data, "main.c")?;
//! assert!(text.metadata.contains("Copyright (c) 2025 Jane Doe"));
//! assert!(text.license.starts_with("SPDX-License-Identifier: MIT"));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::Local;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::verbose_log;

/// License used when nothing else is configured.
pub const DEFAULT_LICENSE: &str = "Apache-2.0";

/// Metadata template used when no custom one is loaded.
pub const DEFAULT_METADATA_TEMPLATE: &str = include_str!("../licenses/header.txt");

/// License bodies shipped with the tool, keyed by SPDX identifier.
pub const BUILTIN_LICENSES: &[(&str, &str)] = &[
  ("Apache-2.0", include_str!("../licenses/Apache-2.0.txt")),
  ("MIT", include_str!("../licenses/MIT.txt")),
  ("GPL-2.0-or-later", include_str!("../licenses/GPL-2.0-or-later.txt")),
  ("BSD-3-Clause", include_str!("../licenses/BSD-3-Clause.txt")),
];

const VARIABLES: &[&str] = &["year", "company", "license", "filename", "authors", "copyright"];

static PLACEHOLDER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_]+)\s*\}\}").expect("placeholder regex must compile"));

/// Error raised while selecting or rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The requested built-in license does not exist.
  #[error("Unknown license '{name}' (available: {available})")]
  UnknownLicense { name: String, available: String },

  /// A template references a variable the renderer does not provide.
  #[error("Unknown template variable: {0}")]
  UnknownVariable(String),
}

/// A copyright holder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
  /// Name as it appears in the copyright line
  pub name: String,
  /// Single year ("2020") or range ("2012-2018"); defaults to the current year
  #[serde(default = "current_year")]
  pub year: String,
}

impl Author {
  pub fn new(name: &str, year: &str) -> Self {
    Self {
      name: name.to_string(),
      year: year.to_string(),
    }
  }

  /// The `Copyright (c) <year> <name>` line for this author.
  pub fn copyright_line(&self) -> String {
    format!("Copyright (c) {} {}", self.year, self.name)
  }
}

/// Data used to fill out the license and metadata templates.
#[derive(Debug, Clone, Default)]
pub struct LicenseData {
  /// License name, substituted for `{{license}}`
  pub license: String,
  /// The copyright year, substituted for `{{year}}`
  pub year: String,
  /// Copyright holders in display order
  pub authors: Vec<Author>,
  /// Company name; defaults to the last author when unset
  pub company: Option<String>,
}

impl LicenseData {
  /// The effective company name.
  pub fn company(&self) -> &str {
    self
      .company
      .as_deref()
      .or_else(|| self.authors.last().map(|author| author.name.as_str()))
      .unwrap_or("")
  }

  /// Returns a copy of this data with a different author list.
  pub fn with_authors(&self, authors: Vec<Author>) -> Self {
    Self {
      authors,
      ..self.clone()
    }
  }
}

/// The two rendered text blobs for one file, before comment wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
  /// File metadata placed above the license
  pub metadata: String,
  /// License body placed between the sentinel markers
  pub license: String,
}

/// Manager for loading and rendering license templates.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use header_keeper::templates::TemplateManager;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut manager = TemplateManager::new();
/// manager.load_template(Path::new("LICENSE.txt"))?;
/// manager.load_metadata_template(Path::new("header.txt"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TemplateManager {
  /// Name of the loaded license
  license_name: String,
  /// The loaded license template content
  license_template: String,
  /// The loaded metadata template content
  metadata_template: String,
}

impl Default for TemplateManager {
  fn default() -> Self {
    Self::new()
  }
}

impl TemplateManager {
  /// Creates a template manager with the default built-in license and the
  /// default metadata template.
  pub fn new() -> Self {
    Self {
      license_name: DEFAULT_LICENSE.to_string(),
      license_template: builtin_license(DEFAULT_LICENSE).unwrap_or_default().to_string(),
      metadata_template: DEFAULT_METADATA_TEMPLATE.to_string(),
    }
  }

  /// Creates a template manager for a built-in license.
  pub fn builtin(name: &str) -> Result<Self, TemplateError> {
    let mut manager = Self::new();
    manager.use_builtin(name)?;
    Ok(manager)
  }

  /// Switches to a built-in license body.
  ///
  /// Lookup is case-insensitive; the canonical name is kept.
  pub fn use_builtin(&mut self, name: &str) -> Result<(), TemplateError> {
    let (canonical, body) = BUILTIN_LICENSES
      .iter()
      .find(|(known, _)| known.eq_ignore_ascii_case(name))
      .ok_or_else(|| TemplateError::UnknownLicense {
        name: name.to_string(),
        available: builtin_license_names().join(", "),
      })?;

    verbose_log!("Using built-in license: {}", canonical);
    self.license_name = (*canonical).to_string();
    self.license_template = (*body).to_string();
    Ok(())
  }

  /// Loads a custom license template from a file.
  ///
  /// The license name becomes the file stem.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - The file cannot be read or is not valid UTF-8
  /// - The template references an unknown variable
  pub fn load_template(&mut self, path: &Path) -> Result<()> {
    verbose_log!("Loading license template from: {}", path.display());

    let template_content =
      fs::read_to_string(path).with_context(|| format!("Failed to read license template file: {}", path.display()))?;
    check_variables(&template_content)
      .with_context(|| format!("Invalid license template: {}", path.display()))?;

    self.license_name = path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_else(|| "custom".to_string());
    self.license_template = template_content;

    Ok(())
  }

  /// Loads the metadata template from a file.
  ///
  /// An empty file means no metadata lines above the license.
  pub fn load_metadata_template(&mut self, path: &Path) -> Result<()> {
    verbose_log!("Loading metadata template from: {}", path.display());

    let template_content =
      fs::read_to_string(path).with_context(|| format!("Failed to read metadata template file: {}", path.display()))?;
    check_variables(&template_content)
      .with_context(|| format!("Invalid metadata template: {}", path.display()))?;

    self.metadata_template = template_content;
    Ok(())
  }

  /// Sets the license template directly.
  pub fn set_license_template(&mut self, name: &str, template: &str) -> Result<(), TemplateError> {
    check_variables(template)?;
    self.license_name = name.to_string();
    self.license_template = template.to_string();
    Ok(())
  }

  /// Sets the metadata template directly.
  pub fn set_metadata_template(&mut self, template: &str) -> Result<(), TemplateError> {
    check_variables(template)?;
    self.metadata_template = template.to_string();
    Ok(())
  }

  pub fn license_name(&self) -> &str {
    &self.license_name
  }

  /// Renders the license and metadata templates for one file.
  ///
  /// # Parameters
  ///
  /// * `data` - License data containing values to substitute into the templates
  /// * `filename` - File name substituted for `{{filename}}`
  pub fn render(&self, data: &LicenseData, filename: &str) -> Result<RenderedText, TemplateError> {
    Ok(RenderedText {
      metadata: substitute(&self.metadata_template, data, filename)?,
      license: substitute(&self.license_template, data, filename)?,
    })
  }
}

/// The current calendar year, e.g. "2025".
pub fn current_year() -> String {
  Local::now().format("%Y").to_string()
}

/// Names of the built-in licenses.
pub fn builtin_license_names() -> Vec<&'static str> {
  BUILTIN_LICENSES.iter().map(|(name, _)| *name).collect()
}

fn builtin_license(name: &str) -> Option<&'static str> {
  BUILTIN_LICENSES
    .iter()
    .find(|(known, _)| *known == name)
    .map(|(_, body)| *body)
}

fn check_variables(template: &str) -> Result<(), TemplateError> {
  for caps in PLACEHOLDER_REGEX.captures_iter(template) {
    if !VARIABLES.contains(&&caps[1]) {
      return Err(TemplateError::UnknownVariable(caps[1].to_string()));
    }
  }
  Ok(())
}

fn substitute(template: &str, data: &LicenseData, filename: &str) -> Result<String, TemplateError> {
  check_variables(template)?;

  let rendered = PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| match &caps[1] {
    "year" => data.year.clone(),
    "company" => data.company().to_string(),
    "license" => data.license.clone(),
    "filename" => filename.to_string(),
    "authors" => data
      .authors
      .iter()
      .map(|author| author.name.as_str())
      .collect::<Vec<_>>()
      .join(", "),
    "copyright" => data
      .authors
      .iter()
      .map(Author::copyright_line)
      .collect::<Vec<_>>()
      .join("\n"),
    _ => caps[0].to_string(),
  });

  Ok(rendered.into_owned())
}
