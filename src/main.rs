//! # header-keeper
//!
//! Inserts and maintains license headers in source files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.get_run_args())
}
