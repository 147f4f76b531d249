//! # Content Transformer Module
//!
//! Text rewrites applied in fix modes: license header repair, tab expansion
//! and trailing whitespace removal. All functions are pure; writing the
//! result back is the processor's job.

use crate::checks::{ENCODING_DECLARATION, INTERPRETER_DIRECTIVE};
use crate::file_kind::FileKind;
use crate::licenses::ApprovedLicenses;

/// Tab stops are every four columns.
pub const TAB_WIDTH: usize = 4;

const TRAILING_WHITESPACE_CHARS: [char; 4] = [' ', '\t', '\x0C', '\x0B'];

/// How a license header was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseFix {
  /// An approved license was present but preceded by whitespace
  StrippedLeadingWhitespace,
  /// The default license was inserted ahead of the original content
  InsertedDefault,
}

impl LicenseFix {
  pub const fn message(self) -> &'static str {
    match self {
      LicenseFix::StrippedLeadingWhitespace => "Fix: removing whitespace before the approved license.",
      LicenseFix::InsertedDefault => "Fix: Inserting a default license before the original content.",
    }
  }
}

/// Splits a Python file into its prelude and the remaining content.
///
/// The prelude is an optional interpreter directive (`#!`) followed by an
/// optional encoding declaration (`# -*-`), kept verbatim. A prelude line that
/// is not terminated gets a newline appended so that text placed after it
/// starts on its own line.
pub fn extract_prelude(content: &str) -> (String, &str) {
  let mut prelude = String::new();
  let mut rest = content;

  for marker in [INTERPRETER_DIRECTIVE, ENCODING_DECLARATION] {
    if rest.starts_with(marker) {
      let (line, remaining) = rest.split_once('\n').unwrap_or((rest, ""));
      prelude.push_str(line);
      prelude.push('\n');
      rest = remaining;
    }
  }

  (prelude, rest)
}

/// Repairs the license header of a file of the given kind.
///
/// If removing leading whitespace exposes an approved license, only the
/// whitespace is removed. Otherwise the default license for the kind is
/// inserted ahead of the original content (after the prelude for Python).
pub fn fix_license(kind: FileKind, content: &str, licenses: &ApprovedLicenses) -> (String, LicenseFix) {
  let default_license = licenses.default_for(kind);

  match kind {
    FileKind::ScriptSource => {
      let (prelude, rest) = extract_prelude(content);
      let trimmed = rest.trim_start();
      if !rest.starts_with('#') && licenses.starts_content(kind, trimmed) {
        (prelude + trimmed, LicenseFix::StrippedLeadingWhitespace)
      } else {
        (format!("{prelude}{default_license}{rest}"), LicenseFix::InsertedDefault)
      }
    }
    FileKind::NativeSource(_) | FileKind::Unchecked => {
      let trimmed = content.trim_start();
      if licenses.starts_content(kind, trimmed) {
        (trimmed.to_string(), LicenseFix::StrippedLeadingWhitespace)
      } else {
        (format!("{default_license}{content}"), LicenseFix::InsertedDefault)
      }
    }
  }
}

/// Replaces every tab with spaces up to the next tab stop.
///
/// Columns are counted in characters from the start of each line, including
/// spaces produced by earlier tabs on the same line. Trailing whitespace
/// produced this way is left for [`strip_trailing_whitespace`].
pub fn expand_tabs(content: &str) -> String {
  content.split('\n').map(expand_line).collect::<Vec<_>>().join("\n")
}

fn expand_line(line: &str) -> String {
  let mut expanded = String::with_capacity(line.len());
  let mut column = 0;

  for ch in line.chars() {
    if ch == '\t' {
      let pad = TAB_WIDTH - column % TAB_WIDTH;
      expanded.extend(std::iter::repeat_n(' ', pad));
      column += pad;
    } else {
      expanded.push(ch);
      column += 1;
    }
  }

  expanded
}

/// Removes spaces, tabs, form feeds and vertical tabs at the end of every line.
pub fn strip_trailing_whitespace(content: &str) -> String {
  content
    .split('\n')
    .map(|line| line.trim_end_matches(TRAILING_WHITESPACE_CHARS))
    .collect::<Vec<_>>()
    .join("\n")
}
