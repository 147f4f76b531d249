//! # Check Command
//!
//! Runs the checks over the primary repository and any additional
//! repositories named after `--`, printing one verdict per repository.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use licensescheck::config::{CheckConfig, FixLevel, UNSET_REPO_PLACEHOLDER};
use licensescheck::diff::DiffManager;
use licensescheck::licenses::LicenseCatalog;
use licensescheck::logging::{init_tracing, set_quiet, set_verbose};
use licensescheck::output::{print_invalid_option, print_outcome, print_repo_outcome, print_repo_start};
use licensescheck::processor::Processor;
use licensescheck::report::{Outcome, RepoOutcome, exit_code};
use tracing::{debug, info};

use super::Cli;

/// Run the check with the given arguments.
///
/// The exit code is the number of findings in the primary repository
/// (clamped to 255). Findings in additional repositories are printed but do
/// not change it.
pub fn run_check(cli: Cli) -> Result<ExitCode> {
  init_tracing(cli.quiet, cli.verbose);

  if cli.verbose > 0 {
    set_verbose();
  } else if cli.quiet {
    set_quiet();
  }
  cli.colors.apply();

  for option in &cli.ignored_options {
    print_invalid_option(option);
  }

  let fix = FixLevel::from_flags(cli.fixws, cli.fixall);
  let diff_manager = DiffManager::new(cli.show_diff, cli.save_diff);
  diff_manager.init()?;

  let root = cli.root.unwrap_or_else(|| PathBuf::from("."));
  let config = CheckConfig::new(&root, fix, diff_manager)?;
  debug!("Repository root: {}", config.root.display());
  debug!("Fix level: {:?}", config.fix);

  let catalog = LicenseCatalog::load(&config.root).context("Failed to load approved licenses")?;

  let start_time = Instant::now();
  let processor = Processor::new(&config);
  let total = processor.check_primary(&catalog)?;
  info!(
    "Checked primary trees in {}ms: {} findings, {} fixed",
    start_time.elapsed().as_millis(),
    total.found,
    total.fixed
  );

  print_outcome(&Outcome::from_tally(total, config.fix));

  let checker = Processor::check_only(&config);
  for name in cli.repos.iter().filter(|name| *name != UNSET_REPO_PLACEHOLDER) {
    print_repo_start(name);
    let tally = checker.check_external(&config.external_repo_root(name))?;
    print_repo_outcome(&RepoOutcome {
      name: name.clone(),
      tally,
    });
  }

  Ok(exit_code(total.found))
}
