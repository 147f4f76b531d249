//! # File Filter Module
//!
//! This module decides which directory entries the walker visits. Hidden
//! entries and a fixed list of vendored or generated names are pruned.

use std::path::Path;

use crate::verbose_log;

/// Entry names that are never descended into or checked: vendored
/// third-party code, generated JNI headers and non-source resource trees.
pub const PRUNE_LIST: &[&str] = &[
  "hsqldb19b3",
  "hsqldb",
  "jetty716",
  "proj_gen",
  "jni_md.h",
  "jni.h",
  "org_voltdb_jni_ExecutionEngine.h",
  "org_voltcore_utils_DBBPool.h",
  "org_voltcore_utils_DBBPool_DBBContainer.h",
  "simplejson",
  "projectfile",
  "deploymentfile",
  "xml",
  "helloworld",
  "jaxb",
  "pmsg",
];

/// Result of a file filtering operation.
#[derive(Debug, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the entry should be visited
  pub should_process: bool,
  /// Reason why the entry is skipped (if any)
  pub reason: Option<&'static str>,
}

impl FilterResult {
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  pub const fn skip(reason: &'static str) -> Self {
    Self {
      should_process: false,
      reason: Some(reason),
    }
  }
}

/// Trait for components that decide whether a walk entry is visited.
pub trait FileFilter {
  /// Determines whether the entry at `path` should be visited.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Filter that skips hidden entries and names on a prune list.
pub struct PruneFilter {
  prune_list: &'static [&'static str],
}

impl PruneFilter {
  pub const fn new(prune_list: &'static [&'static str]) -> Self {
    Self { prune_list }
  }
}

impl Default for PruneFilter {
  fn default() -> Self {
    Self::new(PRUNE_LIST)
  }
}

impl FileFilter for PruneFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
      return FilterResult::process();
    };

    if name.starts_with('.') {
      verbose_log!("Skipping: {} (hidden)", path.display());
      FilterResult::skip("Hidden entry")
    } else if self.prune_list.contains(&name.as_ref()) {
      verbose_log!("Skipping: {} (prune list)", path.display());
      FilterResult::skip("On the prune list")
    } else {
      FilterResult::process()
    }
  }
}
