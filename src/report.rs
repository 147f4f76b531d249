//! # Report Module
//!
//! Running counters for a walk and the summary verdicts printed at the end
//! of a tree or repository check.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::process::ExitCode;

use crate::config::FixLevel;

/// Counts accumulated over a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
  /// Fixes applied
  pub fixed: usize,
  /// Findings reported, fixed or not
  pub found: usize,
}

impl Tally {
  pub const fn new(fixed: usize, found: usize) -> Self {
    Self { fixed, found }
  }

  pub const fn is_clean(&self) -> bool {
    self.found == 0
  }
}

impl Add for Tally {
  type Output = Tally;

  fn add(self, other: Tally) -> Tally {
    Tally::new(self.fixed + other.fixed, self.found + other.found)
  }
}

impl AddAssign for Tally {
  fn add_assign(&mut self, other: Tally) {
    *self = *self + other;
  }
}

impl Sum for Tally {
  fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
    iter.fold(Tally::default(), Add::add)
  }
}

/// Verdict for the primary repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Success,
  /// Findings exist and fixing was requested
  Progress { fixed: usize, found: usize },
  /// Findings exist and nothing was fixed
  Failure { found: usize },
}

impl Outcome {
  pub fn from_tally(tally: Tally, fix: FixLevel) -> Self {
    if tally.is_clean() {
      Outcome::Success
    } else if fix.is_fixing() {
      Outcome::Progress {
        fixed: tally.fixed,
        found: tally.found,
      }
    } else {
      Outcome::Failure { found: tally.found }
    }
  }
}

const SUCCESS_MESSAGE: &str = "SUCCESS. Found 0 license text errors, 0 files containing tabs or trailing whitespace.";

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::Success => f.write_str(SUCCESS_MESSAGE),
      Outcome::Progress { fixed, found } => write!(
        f,
        "PROGRESS? Tried to fix {fixed} of the {found} found license text or whitespace errors. Re-run \
         licensescheck to validate. Consult .lcbak files to recover if something went wrong."
      ),
      Outcome::Failure { found } => write!(f, "FAILURE. Found {found} license text or whitespace errors."),
    }
  }
}

/// Verdict for an additional repository, which is never fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOutcome {
  pub name: String,
  pub tally: Tally,
}

impl RepoOutcome {
  pub const fn is_success(&self) -> bool {
    self.tally.is_clean()
  }
}

impl fmt::Display for RepoOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_success() {
      f.write_str(SUCCESS_MESSAGE)
    } else {
      write!(
        f,
        "FAILURE ({}). Found {} license text or whitespace errors.",
        self.name, self.tally.found
      )
    }
  }
}

/// Process exit code for the primary findings count.
///
/// Counts above 255 are clamped so that a multiple of 256 never reads as
/// success.
pub fn exit_code(found: usize) -> ExitCode {
  ExitCode::from(exit_status(found))
}

pub fn exit_status(found: usize) -> u8 {
  u8::try_from(found).unwrap_or(u8::MAX)
}
