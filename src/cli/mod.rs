//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing and supports subcommands for
//! extensibility.

mod run;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version = env!("HEADER_KEEPER_VERSION"),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add the default Apache-2.0 header to every supported file in src/
  header-keeper -r -a \"Jane Doe\" src/

  # Preview the changes without touching any file
  header-keeper -r --simulate --show-diff src/

  # Swap only the license text inside existing headers
  header-keeper -r --license MIT --license-only .

  # Only add headers where none exist, skipping vendored code
  header-keeper -r --missing-only --ignore vendor .

  # Keep the copyright holders already named in each file
  header-keeper -r --extract-authors --license-file LICENSE.txt include/ src/

  # Write a JSON report of what happened
  header-keeper -r --report-json report.json .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub run_args: RunArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Insert or update license headers in source files (default)
  Run(RunArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective run arguments, whether from a subcommand or top-level
  pub fn get_run_args(self) -> RunArgs {
    match self.command {
      Some(Command::Run(args)) => args,
      None => self.run_args,
    }
  }
}
