//! # Licenses Module
//!
//! This module loads the approved license headers that checked files must
//! start with.
//!
//! Licenses are grouped twice: by tree (production sources vs. tests and
//! examples) and by comment syntax (block-comment native sources vs. Python).
//! Within a group the order matters only for fixing: the last text is the
//! canonical default that gets inserted into files missing a header.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use licensescheck::file_kind::FileKind;
//! use licensescheck::licenses::LicenseCatalog;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = LicenseCatalog::load(Path::new("."))?;
//! let kind = FileKind::classify(Path::new("src/Main.java"));
//! let header = catalog.source.default_for(kind);
//! # let _ = header;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::file_kind::FileKind;

/// Directory, relative to a repository root, holding the license resources.
pub const LICENSE_DIR: &str = "tools/approved_licenses";

/// Approved native-source headers for the `src` tree, default last.
pub const SOURCE_NATIVE_LICENSES: &[&str] = &[
  "gpl3_hstore_and_voltdb.txt",
  "gpl3_evanjones_and_voltdb.txt",
  "gpl3_base64_and_voltdb.txt",
  "gpl3_voltdb.txt",
];

/// Approved Python headers for the `src` tree.
pub const SOURCE_SCRIPT_LICENSES: &[&str] = &["gpl3_voltdb_python.txt"];

/// Approved native-source headers for the `tests` and `examples` trees, default last.
pub const TEST_NATIVE_LICENSES: &[&str] = &[
  "mit_x11_hstore_and_voltdb.txt",
  "mit_x11_evanjones_and_voltdb.txt",
  "mit_x11_michaelmccanna_and_voltdb.txt",
  "mit_x11_voltdb.txt",
];

/// Approved Python headers for the `tests` and `examples` trees.
pub const TEST_SCRIPT_LICENSES: &[&str] = &["mit_x11_voltdb_python.txt"];

/// Single native-source license of an additional repository.
pub const EXTERNAL_NATIVE_LICENSE: &str = "license.txt";

/// Single Python license of an additional repository.
pub const EXTERNAL_SCRIPT_LICENSE: &str = "license_python.txt";

/// Error type for license resource loading.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
  /// A license resource file could not be read.
  #[error("Failed to read approved license '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// A license group was constructed without any text.
  #[error("No approved {group} licenses were provided")]
  EmptyGroup { group: &'static str },
}

/// The approved headers for one tree, split by comment syntax.
#[derive(Debug, Clone)]
pub struct ApprovedLicenses {
  native: Vec<String>,
  script: Vec<String>,
}

impl ApprovedLicenses {
  /// Builds a group from in-memory texts. Both lists must be non-empty.
  pub fn from_texts(native: Vec<String>, script: Vec<String>) -> Result<Self, LicenseError> {
    if native.is_empty() {
      return Err(LicenseError::EmptyGroup { group: "native" });
    }
    if script.is_empty() {
      return Err(LicenseError::EmptyGroup { group: "script" });
    }
    Ok(Self { native, script })
  }

  /// Reads the named resource files from `dir`, preserving their order.
  pub fn load(dir: &Path, native_files: &[&str], script_files: &[&str]) -> Result<Self, LicenseError> {
    Self::from_texts(read_all(dir, native_files)?, read_all(dir, script_files)?)
  }

  /// Loads the single-license group stored inside an additional repository.
  pub fn load_external(repo_root: &Path) -> Result<Self, LicenseError> {
    Self::load(
      &repo_root.join(LICENSE_DIR),
      &[EXTERNAL_NATIVE_LICENSE],
      &[EXTERNAL_SCRIPT_LICENSE],
    )
  }

  /// The approved texts applying to files of `kind`.
  pub fn for_kind(&self, kind: FileKind) -> &[String] {
    match kind {
      FileKind::NativeSource(_) => &self.native,
      FileKind::ScriptSource => &self.script,
      FileKind::Unchecked => &[],
    }
  }

  /// The canonical header inserted when fixing files of `kind`.
  pub fn default_for(&self, kind: FileKind) -> &str {
    self.for_kind(kind).last().map_or("", String::as_str)
  }

  /// Whether `content` begins with one of the approved texts for `kind`.
  pub fn starts_content(&self, kind: FileKind, content: &str) -> bool {
    self
      .for_kind(kind)
      .iter()
      .any(|license| content.starts_with(license.as_str()))
  }
}

/// All license groups of the primary repository.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
  /// Licenses for the `src` tree
  pub source: ApprovedLicenses,
  /// Licenses for the `tests` and `examples` trees
  pub test: ApprovedLicenses,
}

impl LicenseCatalog {
  /// Loads every group from `<root>/tools/approved_licenses`.
  ///
  /// # Errors
  ///
  /// Returns [`LicenseError::Read`] if any of the fixed resource files is
  /// missing or unreadable.
  pub fn load(root: &Path) -> Result<Self, LicenseError> {
    let dir = root.join(LICENSE_DIR);
    debug!("Loading approved licenses from {}", dir.display());

    Ok(Self {
      source: ApprovedLicenses::load(&dir, SOURCE_NATIVE_LICENSES, SOURCE_SCRIPT_LICENSES)?,
      test: ApprovedLicenses::load(&dir, TEST_NATIVE_LICENSES, TEST_SCRIPT_LICENSES)?,
    })
  }
}

fn read_all(dir: &Path, names: &[&str]) -> Result<Vec<String>, LicenseError> {
  names
    .iter()
    .map(|name| {
      let path = dir.join(name);
      fs::read_to_string(&path).map_err(|source| LicenseError::Read { path, source })
    })
    .collect()
}
