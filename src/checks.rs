//! # Checks Module
//!
//! Independent text predicates run against the full content of a checked
//! file. Each returns `Some(Finding)` when the file violates the rule.
//!
//! Checks are purely textual: nothing here parses the source language.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::file_kind::FileKind;
use crate::licenses::ApprovedLicenses;

/// Prefix of a Python interpreter directive line.
pub const INTERPRETER_DIRECTIVE: &str = "#!";

/// Prefix of a Python source-encoding declaration line.
pub const ENCODING_DECLARATION: &str = "# -*-";

/// A single rule violation found in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
  /// The initial comment is preceded by whitespace
  WhitespaceBeforeComment,
  /// The file does not open with the comment marker for its kind
  MissingComment,
  /// The opening comment is not one of the approved headers
  UnapprovedLicense,
  /// Raw tab characters, with their count
  Tabs(usize),
  /// At least one line ends in whitespace before its newline
  TrailingWhitespace,
  /// Calls to `sprintf`, with their count
  Sprintf(usize),
  /// Calls to `GetStringChars`/`GetStringUTFChars`, with their count
  JniStringChars(usize),
}

impl Finding {
  /// Whether this finding concerns the license header (and is thus fixable
  /// only at the strongest fix level).
  pub const fn is_license(self) -> bool {
    matches!(
      self,
      Finding::WhitespaceBeforeComment | Finding::MissingComment | Finding::UnapprovedLicense
    )
  }
}

impl fmt::Display for Finding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Finding::WhitespaceBeforeComment => write!(f, "contains whitespace before initial comment."),
      Finding::MissingComment => write!(f, "does not begin with a comment."),
      Finding::UnapprovedLicense => write!(f, "does not start with an approved license."),
      Finding::Tabs(count) => write!(f, "contains {count} tabs."),
      Finding::TrailingWhitespace => write!(f, "contains trailing whitespace."),
      Finding::Sprintf(count) => write!(f, "contains {count} calls to sprintf(). Use snprintf()."),
      Finding::JniStringChars(count) => write!(
        f,
        "contains {count} calls to GetStringChars/GetStringUTFChars. These methods return invalid UTF-8 code \
         points for some characters. You should do the encoding in Java and pass the string to native code as a \
         byte array."
      ),
    }
  }
}

/// Verifies that the file opens with an approved license for its kind.
///
/// Python files may carry an interpreter directive and then an encoding
/// declaration ahead of the license; both are skipped, each followed by any
/// whitespace. Native files must start with the license directly.
pub fn check_license(kind: FileKind, content: &str, licenses: &ApprovedLicenses) -> Option<Finding> {
  let marker = match kind {
    FileKind::Unchecked => return None,
    FileKind::NativeSource(_) => "/*",
    FileKind::ScriptSource => "#",
  };

  if !content.starts_with(marker) {
    return if content.trim_start().starts_with(marker) {
      Some(Finding::WhitespaceBeforeComment)
    } else {
      Some(Finding::MissingComment)
    };
  }

  let mut rest = content;
  if kind == FileKind::ScriptSource {
    if rest.starts_with(INTERPRETER_DIRECTIVE) {
      rest = after_first_line(rest).trim_start();
    }
    if rest.starts_with(ENCODING_DECLARATION) {
      rest = after_first_line(rest).trim_start();
    }
  }

  if licenses.starts_content(kind, rest) {
    None
  } else {
    Some(Finding::UnapprovedLicense)
  }
}

/// Flags any raw tab character.
pub fn check_tabs(content: &str) -> Option<Finding> {
  let count = content.matches('\t').count();
  (count > 0).then_some(Finding::Tabs(count))
}

static TRAILING_WHITESPACE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\t\x0C\x0B ]\n").expect("trailing whitespace regex must compile"));

/// Flags whitespace directly before a newline.
///
/// A final line without a terminating newline is never flagged.
pub fn check_trailing_whitespace(content: &str) -> Option<Finding> {
  TRAILING_WHITESPACE
    .is_match(content)
    .then_some(Finding::TrailingWhitespace)
}

/// Counts `sprintf` occurrences. Not fixable.
pub fn check_sprintf(content: &str) -> Option<Finding> {
  let count = content.matches("sprintf").count();
  (count > 0).then_some(Finding::Sprintf(count))
}

/// Counts JNI string-extraction calls in C/C++ files. Not fixable.
pub fn check_jni_string_chars(kind: FileKind, content: &str) -> Option<Finding> {
  if !kind.uses_jni_natives() {
    return None;
  }

  // "GetStringUTFChars" does not contain "GetStringChars", so the two counts never overlap.
  let count = content.matches("GetStringChars").count() + content.matches("GetStringUTFChars").count();
  (count > 0).then_some(Finding::JniStringChars(count))
}

fn after_first_line(content: &str) -> &str {
  content.split_once('\n').map_or("", |(_, rest)| rest)
}
