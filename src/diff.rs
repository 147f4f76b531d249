//! # Diff Module
//!
//! Renders what each fix changed. Diffs can be shown on stderr, appended to
//! a file, or both; by default nothing is rendered.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::TextDiff;

/// Manages diff rendering for applied fixes.
#[derive(Debug, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that diffs are appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so that it only holds diffs from this run.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders a unified diff between `original` and `new` for `path`.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = render_unified(path, original, new);

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

fn render_unified(path: &Path, original: &str, new: &str) -> String {
  let display = path.display().to_string();
  let diff = TextDiff::from_lines(original, new);
  let mut rendered = diff
    .unified_diff()
    .context_radius(2)
    .header(&format!("a/{display}"), &format!("b/{display}"))
    .to_string();
  if !rendered.ends_with('\n') {
    rendered.push('\n');
  }
  rendered
}
