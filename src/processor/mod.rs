//! # Processor Module
//!
//! This module contains the core functionality for walking the source trees,
//! running the checks on every recognized file and applying fixes.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading, backups and atomic rewrites
//! - [`content_transformer`] - The text rewrites used by the fix modes
//! - [`file_collector`] - Directory traversal with pruning
//!
//! The [`Processor`] struct ties them together. It never holds mutable
//! state: counts are returned as a [`Tally`] from every call.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::Path;

use anyhow::{Context, Result};
pub use content_transformer::{
  LicenseFix, TAB_WIDTH, expand_tabs, extract_prelude, fix_license, strip_trailing_whitespace,
};
pub use file_collector::FileCollector;
pub use file_io::{BACKUP_SUFFIX, FileIO};
use tracing::{debug, trace};

use crate::checks::{
  Finding, check_jni_string_chars, check_license, check_sprintf, check_tabs, check_trailing_whitespace,
};
use crate::config::{CheckConfig, EXTERNAL_TREES, FixLevel, PRIMARY_TREES, TreeGroup};
use crate::file_filter::PruneFilter;
use crate::file_kind::FileKind;
use crate::licenses::{ApprovedLicenses, LicenseCatalog};
use crate::output::{print_finding, print_fix};
use crate::report::Tally;

const TABS_FIX_MESSAGE: &str = "Fix: Replacing tabs with 4th-column indentation.";
const TRAILING_WHITESPACE_FIX_MESSAGE: &str = "Fix: Removing trailing whitespace.";

/// Processor for checking and fixing files.
///
/// The `Processor` is responsible for:
/// - Walking a tree while skipping hidden and pruned entries
/// - Running the license, tab, whitespace and unsafe-API checks
/// - Applying the fixes allowed by its [`FixLevel`], backing files up first
pub struct Processor<'a> {
  config: &'a CheckConfig,

  /// Effective fix level, which may be lower than the configured one
  fix: FixLevel,

  collector: FileCollector<PruneFilter>,
}

impl<'a> Processor<'a> {
  /// Creates a processor that fixes at the configured level.
  pub fn new(config: &'a CheckConfig) -> Self {
    Self::with_fix_level(config, config.fix)
  }

  /// Creates a processor that never modifies files.
  pub fn check_only(config: &'a CheckConfig) -> Self {
    Self::with_fix_level(config, FixLevel::None)
  }

  fn with_fix_level(config: &'a CheckConfig, fix: FixLevel) -> Self {
    Self {
      config,
      fix,
      collector: FileCollector::new(PruneFilter::default()),
    }
  }

  /// Checks the `src`, `tests` and `examples` trees of the primary
  /// repository against their license groups.
  pub fn check_primary(&self, catalog: &LicenseCatalog) -> Result<Tally> {
    let mut total = Tally::default();
    for (tree, group) in PRIMARY_TREES {
      let licenses = match group {
        TreeGroup::Source => &catalog.source,
        TreeGroup::Test => &catalog.test,
      };
      total += self.process_tree(&self.config.root.join(tree), licenses)?;
    }
    Ok(total)
  }

  /// Checks the `src` and `tests` trees of an additional repository against
  /// the licenses stored inside that repository.
  pub fn check_external(&self, repo_root: &Path) -> Result<Tally> {
    let licenses = ApprovedLicenses::load_external(repo_root)
      .with_context(|| format!("Failed to load licenses of repository {}", repo_root.display()))?;

    let mut total = Tally::default();
    for tree in EXTERNAL_TREES {
      total += self.process_tree(&repo_root.join(tree), &licenses)?;
    }
    Ok(total)
  }

  /// Processes every file below `dir`.
  ///
  /// # Errors
  ///
  /// Returns an error if the tree cannot be walked or a checked file cannot
  /// be read or rewritten. Rule violations are never errors.
  pub fn process_tree(&self, dir: &Path, licenses: &ApprovedLicenses) -> Result<Tally> {
    let files = self.collector.traverse_directory(dir)?;

    let total = files
      .iter()
      .map(|path| self.process_file(path, licenses))
      .sum::<Result<Tally>>()?;

    debug!(
      "{}: {} findings, {} fixed",
      dir.display(),
      total.found,
      total.fixed
    );
    Ok(total)
  }

  /// Runs every check on one file, fixing what the fix level allows.
  ///
  /// Files with an unrecognized suffix are not read and count as clean.
  /// Each check sees the content produced by the fixes before it.
  pub fn process_file(&self, path: &Path, licenses: &ApprovedLicenses) -> Result<Tally> {
    let kind = FileKind::classify(path);
    if !kind.is_checked() {
      trace!("Skipping: {} (unchecked suffix)", path.display());
      return Ok(Tally::default());
    }

    let mut content = FileIO::read_full_content(path)?;
    if self.fix.is_fixing() {
      FileIO::remove_stale_backup(path)?;
    }

    let mut tally = Tally::default();

    if let Some(finding) = check_license(kind, &content, licenses) {
      self.report(path, finding, &mut tally);
      if self.fix.fixes_licenses() {
        let (repaired, action) = fix_license(kind, &content, licenses);
        print_fix(action.message());
        content = self.apply_fix(path, repaired, &content, &mut tally)?;
      }
    }

    if let Some(finding) = check_tabs(&content) {
      self.report(path, finding, &mut tally);
      if self.fix.fixes_whitespace() {
        print_fix(TABS_FIX_MESSAGE);
        content = self.apply_fix(path, expand_tabs(&content), &content, &mut tally)?;
      }
    }

    if let Some(finding) = check_trailing_whitespace(&content) {
      self.report(path, finding, &mut tally);
      if self.fix.fixes_whitespace() {
        print_fix(TRAILING_WHITESPACE_FIX_MESSAGE);
        content = self.apply_fix(path, strip_trailing_whitespace(&content), &content, &mut tally)?;
      }
    }

    for finding in [check_sprintf(&content), check_jni_string_chars(kind, &content)]
      .into_iter()
      .flatten()
    {
      self.report(path, finding, &mut tally);
    }

    Ok(tally)
  }

  fn report(&self, path: &Path, finding: Finding, tally: &mut Tally) {
    print_finding(path, finding, Some(&self.config.display_base));
    tally.found += 1;
  }

  fn apply_fix(&self, path: &Path, repaired: String, original: &str, tally: &mut Tally) -> Result<String> {
    if let Err(e) = self.config.diff.display_diff(path, original, &repaired) {
      eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
    }
    FileIO::write_repaired(path, &repaired, original)?;
    tally.fixed += 1;
    Ok(repaired)
  }
}
