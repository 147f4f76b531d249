//! # Output Module
//!
//! This module centralizes all user-facing output on stdout. Every line
//! keeps a fixed textual shape so CI logs can be grepped; color is added
//! only when stdout supports it.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::checks::Finding;
use crate::info_log;
use crate::report::{Outcome, RepoOutcome};

/// Print one finding for a file.
pub fn print_finding(path: &Path, finding: Finding, display_base: Option<&Path>) {
  println!(
    "{} \"{}\" {}",
    "ERROR:".if_supports_color(Stream::Stdout, |s| s.red()),
    make_relative_path(path, display_base),
    finding
  );
}

/// Print the message for an applied fix. Silenced by quiet mode.
pub fn print_fix(message: &str) {
  info_log!("{}", message);
}

/// Print the verdict for the primary repository.
pub fn print_outcome(outcome: &Outcome) {
  let line = outcome.to_string();
  match outcome {
    Outcome::Success => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green())),
    Outcome::Progress { .. } => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.yellow())),
    Outcome::Failure { .. } => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red())),
  }
}

/// Announce an additional repository check. Silenced by quiet mode.
pub fn print_repo_start(name: &str) {
  info_log!("Checking additional repository: {}", name);
}

/// Print the verdict for an additional repository.
pub fn print_repo_outcome(outcome: &RepoOutcome) {
  let line = outcome.to_string();
  if outcome.is_success() {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green()));
  } else {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red()));
  }
}

/// Report an unrecognized option that is being ignored.
pub fn print_invalid_option(arg: &str) {
  println!(
    "IGNORING INVALID OPTION: \"{arg}\". It must be \"--fixws\" or \"--fixall\" or if \"{arg}\" is an additional \
     code repo directory, it must follow a standalone \"--\" option."
  );
}

/// Make a path relative to `base` for display, falling back to the path as given.
fn make_relative_path(path: &Path, base: Option<&Path>) -> String {
  base
    .and_then(|base| pathdiff::diff_paths(path, base))
    .filter(|relative| !relative.as_os_str().is_empty())
    .unwrap_or_else(|| path.to_path_buf())
    .to_string_lossy()
    .to_string()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_make_relative_path_under_base() {
    let path = PathBuf::from("/work/voltdb/src/Foo.java");
    let base = PathBuf::from("/work/voltdb");
    assert_eq!(make_relative_path(&path, Some(&base)), "src/Foo.java");
  }

  #[test]
  fn test_make_relative_path_sibling_repo() {
    let path = PathBuf::from("/work/pro/src/Bar.java");
    let base = PathBuf::from("/work/voltdb");
    assert_eq!(make_relative_path(&path, Some(&base)), "../pro/src/Bar.java");
  }

  #[test]
  fn test_make_relative_path_without_base() {
    let path = PathBuf::from("/work/voltdb/src/Foo.java");
    assert_eq!(make_relative_path(&path, None), "/work/voltdb/src/Foo.java");
  }
}
