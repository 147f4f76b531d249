//! # File Collector Module
//!
//! Recursive directory traversal. Pruned entries are cut off before they
//! are descended into. Symlinks are followed, so a linked file or directory
//! is checked like any other entry.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::file_filter::FileFilter;

/// File collector for directory traversal.
pub struct FileCollector<F> {
  filter: F,
}

impl<F: FileFilter> FileCollector<F> {
  pub const fn new(filter: F) -> Self {
    Self { filter }
  }

  /// Traverses `dir` recursively and collects every regular file that
  /// survives the filter, in file-name order.
  ///
  /// The root itself is never filtered. Symlinks are followed and reported
  /// under their own path.
  ///
  /// # Errors
  ///
  /// Returns an error if `dir` or any directory below it cannot be read,
  /// a symlink is dangling, or links form a loop.
  pub fn traverse_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    let walker = WalkDir::new(dir)
      .follow_links(true)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || self.filter.should_process(entry.path()).should_process);

    let mut files = Vec::new();
    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to read directory tree: {}", dir.display()))?;
      if entry.file_type().is_file() {
        if entry.path_is_symlink() {
          trace!("Following symlink: {}", entry.path().display());
        }
        files.push(entry.into_path());
      }
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::file_filter::PruneFilter;

  #[test]
  fn test_traverse_skips_hidden_and_pruned() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("org/voltdb")).unwrap();
    fs::create_dir_all(root.join("hsqldb")).unwrap();
    fs::create_dir_all(root.join(".hidden")).unwrap();
    fs::write(root.join("org/voltdb/A.java"), "").unwrap();
    fs::write(root.join("hsqldb/B.java"), "").unwrap();
    fs::write(root.join(".hidden/C.java"), "").unwrap();
    fs::write(root.join(".D.java"), "").unwrap();
    fs::write(root.join("jni.h"), "").unwrap();
    fs::write(root.join("notes.txt"), "").unwrap();

    let collector = FileCollector::new(PruneFilter::default());
    let files = collector.traverse_directory(root).unwrap();

    assert_eq!(files, vec![root.join("notes.txt"), root.join("org/voltdb/A.java")]);
  }

  #[test]
  fn test_traverse_root_named_like_pruned_entry() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("xml");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("A.java"), "").unwrap();

    let collector = FileCollector::new(PruneFilter::default());
    assert_eq!(collector.traverse_directory(&root).unwrap(), vec![root.join("A.java")]);
  }

  #[cfg(unix)]
  #[test]
  fn test_traverse_follows_symlinks() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("src");
    let shared = temp_dir.path().join("shared");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&shared).unwrap();
    fs::write(shared.join("Real.java"), "").unwrap();
    std::os::unix::fs::symlink(shared.join("Real.java"), root.join("Link.java")).unwrap();
    std::os::unix::fs::symlink(&shared, root.join("linked")).unwrap();

    let collector = FileCollector::new(PruneFilter::default());
    assert_eq!(
      collector.traverse_directory(&root).unwrap(),
      vec![root.join("Link.java"), root.join("linked/Real.java")]
    );
  }

  #[cfg(unix)]
  #[test]
  fn test_traverse_symlink_loop_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("src");
    fs::create_dir_all(&root).unwrap();
    std::os::unix::fs::symlink(&root, root.join("again")).unwrap();

    let collector = FileCollector::new(PruneFilter::default());
    assert!(collector.traverse_directory(&root).is_err());
  }

  #[test]
  fn test_traverse_missing_directory_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let collector = FileCollector::new(PruneFilter::default());
    assert!(collector.traverse_directory(&temp_dir.path().join("missing")).is_err());
  }
}
