//! # Run Command
//!
//! This module implements the header insert/update command. This is the
//! default command when no subcommand is specified.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use header_keeper::config::{Config, load_config};
use header_keeper::dialect::DialectRegistry;
use header_keeper::diff::DiffManager;
use header_keeper::info_log;
use header_keeper::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use header_keeper::output::{CategorizedReports, print_changes, print_dialects, print_failures, print_start_message, print_summary};
use header_keeper::processor::{Processor, ProcessorConfig, UpdateMode};
use header_keeper::report::{ReportFormat, ReportGenerator, RunReport};
use header_keeper::templates::{Author, LicenseData, TemplateManager, current_year};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Files, directories or glob patterns to process [default: .]
  #[arg(required = false)]
  pub patterns: Vec<String>,

  /// Built-in license to apply (Apache-2.0, MIT, GPL-2.0-or-later, BSD-3-Clause)
  #[arg(long, short = 'l', value_name = "NAME", conflicts_with = "license_file")]
  pub license: Option<String>,

  /// Custom license template file
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Custom metadata template placed above the license (an empty file means none)
  #[arg(long, value_name = "FILE")]
  pub metadata_file: Option<PathBuf>,

  /// Copyright holder (repeatable, e.g. "Max Mustermann")
  #[arg(long, short = 'a', value_name = "AUTHOR")]
  pub author: Vec<String>,

  /// Copyright year(s), e.g. "2011,2012" [default: current year]
  #[arg(long, short = 'y')]
  pub year: Option<String>,

  /// Company name [default: last author]
  #[arg(long, short = 'c')]
  pub company: Option<String>,

  /// Descend into subdirectories
  #[arg(long, short = 'r')]
  pub recursive: bool,

  /// Print the changes but do not write them
  #[arg(long, short = 's')]
  pub simulate: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of every change to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Only add headers to files without a license
  #[arg(long, conflicts_with = "license_only")]
  pub missing_only: bool,

  /// Only replace the license text inside existing headers
  #[arg(long)]
  pub license_only: bool,

  /// Take authors from existing copyright lines in each file
  #[arg(long)]
  pub extract_authors: bool,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i')]
  pub ignore: Vec<String>,

  /// Path to config file (default: .header-keeper.toml in the first scanned directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Generate a JSON report and save it to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Generate a CSV report and save it to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Print the comment dialects in classification order and exit
  #[arg(long)]
  pub list_dialects: bool,
}

impl RunArgs {
  /// Patterns to scan, `.` when none were given.
  fn effective_patterns(&self) -> Vec<String> {
    if self.patterns.is_empty() {
      vec![".".to_string()]
    } else {
      self.patterns.clone()
    }
  }

  /// Update mode from flags, falling back to the config file.
  fn mode(&self, config: &Config) -> UpdateMode {
    if self.missing_only {
      UpdateMode::MissingOnly
    } else if self.license_only {
      UpdateMode::LicenseOnly
    } else {
      config.mode.unwrap_or_default()
    }
  }
}

/// Run the header command with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let patterns = args.effective_patterns();
  let scan_root = scan_root(&patterns);
  debug!("Using scan root: {}", scan_root.display());

  let config = load_config(args.config.as_deref(), &scan_root, args.no_config)?.unwrap_or_default();
  let registry = DialectRegistry::with_custom(config.dialects.clone());

  if args.list_dialects {
    print_dialects(&registry);
    return Ok(());
  }

  let template_manager = build_template_manager(&args, &config)?;
  let license_data = build_license_data(&args, &config, template_manager.license_name());

  let mut ignore_patterns = config.ignore.clone();
  ignore_patterns.extend(args.ignore.iter().cloned());

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());

  let processor = Processor::new(ProcessorConfig {
    registry,
    mode: args.mode(&config),
    simulate: args.simulate,
    extract_authors: args.extract_authors || config.extract_authors.unwrap_or(false),
    recursive: args.recursive,
    ignore_patterns,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(template_manager, license_data)
  })?;

  let files = processor.collect_files(&patterns)?;
  print_start_message(files.len(), args.simulate);

  let report = processor.process_paths(&files);
  print_report(&report, args.simulate);
  write_reports(&args, &report);

  if report.has_failures() {
    process::exit(1);
  }

  Ok(())
}

/// Directory where config discovery starts: the first pattern if it is a
/// directory, otherwise its parent.
fn scan_root(patterns: &[String]) -> PathBuf {
  let Some(first) = patterns.first() else {
    return PathBuf::from(".");
  };

  let path = Path::new(first);
  if path.is_dir() {
    return path.to_path_buf();
  }

  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() && parent.is_dir() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}

fn build_template_manager(args: &RunArgs, config: &Config) -> Result<TemplateManager> {
  let mut template_manager = TemplateManager::new();

  if let Some(ref license_file) = args.license_file {
    template_manager
      .load_template(license_file)
      .with_context(|| format!("Failed to load license template from {}", license_file.display()))?;
  } else if let Some(ref license) = args.license {
    template_manager.use_builtin(license)?;
  } else if let Some(ref license_file) = config.license_file {
    template_manager
      .load_template(license_file)
      .with_context(|| format!("Failed to load license template from {}", license_file.display()))?;
  } else if let Some(ref license) = config.license {
    template_manager.use_builtin(license)?;
  }

  if let Some(metadata_file) = args.metadata_file.as_ref().or(config.metadata_file.as_ref()) {
    template_manager
      .load_metadata_template(metadata_file)
      .with_context(|| format!("Failed to load metadata template from {}", metadata_file.display()))?;
  }

  Ok(template_manager)
}

fn build_license_data(args: &RunArgs, config: &Config, license_name: &str) -> LicenseData {
  let year = args
    .year
    .clone()
    .or_else(|| config.year.clone())
    .unwrap_or_else(current_year);

  let authors = if args.author.is_empty() {
    config.authors.clone()
  } else {
    args.author.iter().map(|name| Author::new(name, &year)).collect()
  };

  LicenseData {
    license: license_name.to_string(),
    year,
    authors,
    company: args.company.clone().or_else(|| config.company.clone()),
  }
}

fn print_report(report: &RunReport, simulate: bool) {
  let categorized = CategorizedReports::from_reports(&report.files);
  let root = std::env::current_dir().ok();

  print_changes(&categorized, root.as_deref(), simulate);
  print_failures(&categorized.failed, root.as_deref());
  print_summary(&report.summary);
}

fn write_reports(args: &RunArgs, report: &RunReport) {
  let requested = [
    (ReportFormat::Json, args.report_json.as_deref()),
    (ReportFormat::Csv, args.report_csv.as_deref()),
  ];

  for (format, output_path) in requested {
    let Some(output_path) = output_path else {
      continue;
    };
    match ReportGenerator::new(format, output_path).generate(report) {
      Ok(()) => info_log!("Generated {} report at {}", format, output_path.display()),
      Err(e) => eprintln!("Error generating {} report: {:#}", format, e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_effective_patterns_default_to_current_dir() {
    let args = RunArgs::default();
    assert_eq!(args.effective_patterns(), vec![".".to_string()]);
  }

  #[test]
  fn test_mode_flags_override_config() {
    let config = Config {
      mode: Some(UpdateMode::LicenseOnly),
      ..Config::default()
    };

    let args = RunArgs::default();
    assert_eq!(args.mode(&config), UpdateMode::LicenseOnly);
    assert_eq!(args.mode(&Config::default()), UpdateMode::ReplaceHeader);

    let args = RunArgs {
      missing_only: true,
      ..RunArgs::default()
    };
    assert_eq!(args.mode(&config), UpdateMode::MissingOnly);
  }

  #[test]
  fn test_license_data_prefers_cli_values() {
    let config = Config {
      year: Some("1999".to_string()),
      company: Some("Config Corp".to_string()),
      authors: vec![Author::new("Config Author", "1999")],
      ..Config::default()
    };

    let args = RunArgs {
      year: Some("2024".to_string()),
      author: vec!["Jane".to_string()],
      ..RunArgs::default()
    };
    let data = build_license_data(&args, &config, "MIT");

    assert_eq!(data.year, "2024");
    assert_eq!(data.authors, vec![Author::new("Jane", "2024")]);
    assert_eq!(data.company(), "Config Corp");
    assert_eq!(data.license, "MIT");

    let data = build_license_data(&RunArgs::default(), &config, "MIT");
    assert_eq!(data.year, "1999");
    assert_eq!(data.authors, vec![Author::new("Config Author", "1999")]);
  }

  #[test]
  fn test_template_manager_from_config() {
    let config = Config {
      license: Some("mit".to_string()),
      ..Config::default()
    };

    let manager = build_template_manager(&RunArgs::default(), &config).expect("build");
    assert_eq!(manager.license_name(), "MIT");

    let args = RunArgs {
      license: Some("BSD-3-Clause".to_string()),
      ..RunArgs::default()
    };
    let manager = build_template_manager(&args, &config).expect("build");
    assert_eq!(manager.license_name(), "BSD-3-Clause");
  }

  #[test]
  fn test_scan_root() {
    let temp_dir = tempfile::TempDir::new().expect("create temp dir");
    let dir = temp_dir.path().to_string_lossy().into_owned();
    let file = temp_dir.path().join("a.c").to_string_lossy().into_owned();

    assert_eq!(scan_root(std::slice::from_ref(&dir)), temp_dir.path());
    assert_eq!(scan_root(&[file]), temp_dir.path());
    assert_eq!(scan_root(&["*.c".to_string()]), PathBuf::from("."));
  }
}
