//! # Configuration Module
//!
//! This module provides configuration file support for header-keeper: the
//! license and metadata templates, copyright holders, update mode, ignore
//! patterns and extra comment dialects.
//!
//! Configuration can be specified in a `.header-keeper.toml` file or via the
//! `HEADER_KEEPER_CONFIG` environment variable. Command line flags override
//! anything set here.
//!
//! ```toml
//! license = "MIT"
//! company = "Acme"
//! mode = "license-only"
//! ignore = ["vendor", "*.generated.c"]
//!
//! [[authors]]
//! name = "Jane Doe"
//! year = "2020"
//!
//! [[dialects]]
//! name = "Lua"
//! block-open = "--[["
//! line-prefix = "--"
//! block-close = "--]]"
//! patterns = [".lua"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dialect::CommentDialect;
use crate::processor::UpdateMode;
use crate::templates::{Author, builtin_license_names};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".header-keeper.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADER_KEEPER_CONFIG";

/// Main configuration struct for header-keeper.
///
/// Every field is optional; unset fields fall back to the command line or the
/// built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
  /// Name of a built-in license
  pub license: Option<String>,

  /// Custom license template; relative paths resolve against the config file
  pub license_file: Option<PathBuf>,

  /// Custom metadata template; relative paths resolve against the config file
  pub metadata_file: Option<PathBuf>,

  /// Company name for the `{{company}}` variable
  pub company: Option<String>,

  /// Year for the `{{year}}` variable
  pub year: Option<String>,

  /// How files that already have a license are updated
  pub mode: Option<UpdateMode>,

  /// Take authors from existing copyright lines
  pub extract_authors: Option<bool>,

  /// Glob patterns for paths to skip
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Copyright holders
  #[serde(default)]
  pub authors: Vec<Author>,

  /// Extra comment dialects, checked before the built-in ones
  #[serde(default)]
  pub dialects: Vec<CommentDialect>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A dialect definition is unusable.
  #[error("Invalid dialect '{name}': {message}")]
  InvalidDialect { name: String, message: String },

  /// The configured license is not built in.
  #[error("Unknown license '{name}' (available: {available})")]
  UnknownLicense { name: String, available: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = config.resolve_paths(base_dir);

    verbose_log!(
      "Loaded {} authors and {} dialects from config",
      config.authors.len(),
      config.dialects.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every dialect has a name and at least one non-empty pattern
  /// - Every dialect has a line prefix or a block opener
  /// - The license, if set, is a built-in one
  fn validate(&self) -> Result<(), ConfigError> {
    for dialect in &self.dialects {
      let invalid = |message: &str| ConfigError::InvalidDialect {
        name: dialect.name.clone(),
        message: message.to_string(),
      };

      if dialect.name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
      }
      if !dialect.patterns.iter().any(|pattern| !pattern.is_empty()) {
        return Err(invalid("at least one non-empty pattern is required"));
      }
      if dialect.line_prefix.trim().is_empty() && dialect.block_open.trim().is_empty() {
        return Err(invalid("line-prefix and block-open cannot both be empty"));
      }
    }

    if let Some(ref license) = self.license {
      let names = builtin_license_names();
      if !names.iter().any(|name| name.eq_ignore_ascii_case(license)) {
        return Err(ConfigError::UnknownLicense {
          name: license.clone(),
          available: names.join(", "),
        });
      }
    }

    Ok(())
  }

  fn resolve_paths(mut self, base_dir: &Path) -> Self {
    let resolve = |path: PathBuf| {
      if path.is_absolute() {
        path
      } else {
        base_dir.join(path)
      }
    };

    self.license_file = self.license_file.map(resolve);
    self.metadata_file = self.metadata_file.map(resolve);
    self
  }
}

/// Discover the configuration file path.
///
/// The search order is:
/// 1. Explicit path from `--config`
/// 2. The `HEADER_KEEPER_CONFIG` environment variable
/// 3. `.header-keeper.toml` in the scan root
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `scan_root` - The first directory being scanned
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, scan_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = scan_root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `scan_root` - The first directory being scanned
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is used. An explicit
/// path that cannot be loaded is an error.
pub fn load_config(explicit_path: Option<&Path>, scan_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, scan_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
