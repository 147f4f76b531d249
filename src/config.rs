//! # Configuration Module
//!
//! The run configuration is a single immutable [`CheckConfig`] value built
//! from the command line. There is no configuration file; the repository
//! layout below is fixed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::diff::DiffManager;

/// Build property placeholder that shows up verbatim when the property is
/// unset. It is never treated as a repository name.
pub const UNSET_REPO_PLACEHOLDER: &str = "${voltpro}";

/// Trees of an additional repository, checked against its own licenses.
pub const EXTERNAL_TREES: [&str; 2] = ["src", "tests"];

/// Which license group a primary tree is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeGroup {
  /// Production sources
  Source,
  /// Tests and examples
  Test,
}

/// Trees of the primary repository in the order they are checked.
pub const PRIMARY_TREES: [(&str, TreeGroup); 3] = [
  ("src", TreeGroup::Source),
  ("tests", TreeGroup::Test),
  ("examples", TreeGroup::Test),
];

/// Which fixers run. Levels are ordered: each includes the ones below it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FixLevel {
  /// Check only
  #[default]
  None,
  /// Expand tabs and strip trailing whitespace
  Whitespace,
  /// Whitespace fixes plus license header repair
  All,
}

impl FixLevel {
  pub const fn from_flags(fixws: bool, fixall: bool) -> Self {
    if fixall {
      FixLevel::All
    } else if fixws {
      FixLevel::Whitespace
    } else {
      FixLevel::None
    }
  }

  pub fn is_fixing(self) -> bool {
    self > FixLevel::None
  }

  pub fn fixes_whitespace(self) -> bool {
    self >= FixLevel::Whitespace
  }

  /// License repair is gated separately so that a whitespace-only run never
  /// stamps a header onto a file.
  pub fn fixes_licenses(self) -> bool {
    self >= FixLevel::All
  }
}

/// Configuration for one invocation.
pub struct CheckConfig {
  /// Absolute root of the primary repository
  pub root: PathBuf,
  /// Fix level for the primary trees
  pub fix: FixLevel,
  /// Diff output for applied fixes
  pub diff: DiffManager,
  /// Directory that printed paths are made relative to
  pub display_base: PathBuf,
}

impl CheckConfig {
  /// Creates a configuration rooted at `root`.
  ///
  /// # Errors
  ///
  /// Returns an error if `root` does not exist or the current directory is
  /// unavailable.
  pub fn new(root: &Path, fix: FixLevel, diff: DiffManager) -> Result<Self> {
    let root = root
      .canonicalize()
      .with_context(|| format!("Failed to resolve repository root: {}", root.display()))?;
    let display_base = std::env::current_dir()
      .with_context(|| "Failed to get current directory")?
      .canonicalize()
      .with_context(|| "Failed to resolve current directory")?;

    Ok(Self {
      root,
      fix,
      diff,
      display_base,
    })
  }

  /// Location of an additional repository: a sibling of the primary root.
  pub fn external_repo_root(&self, name: &str) -> PathBuf {
    self.root.parent().unwrap_or(&self.root).join(name)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_fix_level_from_flags() {
    assert_eq!(FixLevel::from_flags(false, false), FixLevel::None);
    assert_eq!(FixLevel::from_flags(true, false), FixLevel::Whitespace);
    assert_eq!(FixLevel::from_flags(false, true), FixLevel::All);
    assert_eq!(FixLevel::from_flags(true, true), FixLevel::All);
  }

  #[test]
  fn test_fix_level_gates() {
    assert!(!FixLevel::None.is_fixing());
    assert!(FixLevel::Whitespace.fixes_whitespace());
    assert!(!FixLevel::Whitespace.fixes_licenses());
    assert!(FixLevel::All.fixes_whitespace());
    assert!(FixLevel::All.fixes_licenses());
  }

  #[test]
  fn test_external_repo_is_sibling() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("voltdb");
    std::fs::create_dir_all(&root).unwrap();

    let config = CheckConfig::new(&root, FixLevel::None, DiffManager::default()).unwrap();
    assert_eq!(
      config.external_repo_root("pro"),
      temp_dir.path().canonicalize().unwrap().join("pro")
    );
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let result = CheckConfig::new(&temp_dir.path().join("nope"), FixLevel::None, DiffManager::default());
    assert!(result.is_err());
  }
}
