//! # File I/O Module
//!
//! Reading checked files, writing repaired content back and managing the
//! `.lcbak` backups that make every fix recoverable.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::trace;

/// Suffix appended to a file name to form its backup.
pub const BACKUP_SUFFIX: &str = ".lcbak";

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file as UTF-8 text.
  pub fn read_full_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// The backup path for `path`, i.e. `<path>.lcbak`.
  pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
  }

  /// Deletes a backup left behind by a previous run. A missing backup is fine.
  pub fn remove_stale_backup(path: &Path) -> Result<()> {
    let backup = Self::backup_path(path);
    match fs::remove_file(&backup) {
      Ok(()) => {
        trace!("Removed stale backup {}", backup.display());
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("Failed to remove backup: {}", backup.display())),
    }
  }

  /// Writes `original` to the backup path unless a backup already exists.
  ///
  /// Returns `true` if a backup was created. The first backup of a run is
  /// the one that holds the pre-fix content, so it is never overwritten.
  pub fn write_backup(path: &Path, original: &str) -> Result<bool> {
    let backup = Self::backup_path(path);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&backup) {
      Ok(file) => file,
      Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
      Err(e) => return Err(e).with_context(|| format!("Failed to create backup: {}", backup.display())),
    };

    file
      .write_all(original.as_bytes())
      .with_context(|| format!("Failed to write backup: {}", backup.display()))?;
    trace!("Created backup {}", backup.display());
    Ok(true)
  }

  /// Replaces the content of `path` with `content`.
  ///
  /// The new content goes to a temporary file in the same directory which is
  /// then renamed over the original, so a reader sees either the old or the
  /// new file. The original permissions are carried over. A symlink is
  /// written through, so the link itself stays in place.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path).with_context(|| format!("Failed to resolve file: {}", path.display()))?;
    let dir = target.parent().unwrap_or(Path::new("."));
    let permissions = fs::metadata(&target)
      .with_context(|| format!("Failed to stat file: {}", path.display()))?
      .permissions();

    let mut temp = NamedTempFile::new_in(dir)
      .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    fs::set_permissions(temp.path(), permissions)
      .with_context(|| format!("Failed to copy permissions for {}", path.display()))?;
    temp
      .persist(&target)
      .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
  }

  /// Backs up `original` (first fix only) and then writes `repaired`.
  pub fn write_repaired(path: &Path, repaired: &str, original: &str) -> Result<()> {
    Self::write_backup(path, original)?;
    Self::write_file(path, repaired)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_backup_path_appends_suffix() {
    assert_eq!(
      FileIO::backup_path(Path::new("src/Foo.java")),
      PathBuf::from("src/Foo.java.lcbak")
    );
  }

  #[test]
  fn test_first_backup_wins() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("a.cpp");
    fs::write(&path, "original").unwrap();

    FileIO::write_repaired(&path, "first fix", "original").unwrap();
    FileIO::write_repaired(&path, "second fix", "first fix").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "second fix");
    assert_eq!(fs::read_to_string(FileIO::backup_path(&path)).unwrap(), "original");
  }

  #[test]
  fn test_remove_stale_backup() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("a.py");
    fs::write(FileIO::backup_path(&path), "stale").unwrap();

    FileIO::remove_stale_backup(&path).unwrap();
    assert!(!FileIO::backup_path(&path).exists());

    // Removing again is a no-op.
    FileIO::remove_stale_backup(&path).unwrap();
  }

  #[cfg(unix)]
  #[test]
  fn test_write_file_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("run.py");
    fs::write(&path, "old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    FileIO::write_file(&path, "new").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o755);
  }

  #[cfg(unix)]
  #[test]
  fn test_write_file_through_symlink() {
    let temp_dir = tempdir().unwrap();
    let real = temp_dir.path().join("Real.java");
    let link = temp_dir.path().join("Link.java");
    fs::write(&real, "old").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    FileIO::write_file(&link, "new").unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real).unwrap(), "new");
  }

  #[test]
  fn test_read_invalid_utf8_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("bin.h");
    fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();
    assert!(FileIO::read_full_content(&path).is_err());
  }
}
