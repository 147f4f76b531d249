//! # licensescheck
//!
//! Verifies that source files start with an approved license header and
//! are free of tabs, trailing whitespace and unsafe string APIs.

mod cli;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run_check(cli)
}
