//! # File Kind Module
//!
//! Maps a file name to the rule set that applies to it. Only a fixed set of
//! suffixes is checked; everything else is [`FileKind::Unchecked`].

use std::path::Path;

/// Compiled languages whose files must open with a `/*` block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeLanguage {
  Java,
  /// C and C++ sources and headers (`.cpp`, `.cc`, `.h`, `.hpp`)
  Cpp,
}

/// Classification of a file for checking purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
  /// Not a recognized source file; ignored by every check
  Unchecked,
  /// Compiled-language source, licensed with a block comment
  NativeSource(NativeLanguage),
  /// Python source, licensed with `#` line comments after an optional prelude
  ScriptSource,
}

const SUFFIXES: &[(&str, FileKind)] = &[
  (".java", FileKind::NativeSource(NativeLanguage::Java)),
  (".cpp", FileKind::NativeSource(NativeLanguage::Cpp)),
  (".cc", FileKind::NativeSource(NativeLanguage::Cpp)),
  (".hpp", FileKind::NativeSource(NativeLanguage::Cpp)),
  (".h", FileKind::NativeSource(NativeLanguage::Cpp)),
  (".py", FileKind::ScriptSource),
];

impl FileKind {
  /// Classifies a path by the suffix of its file name (case-sensitive).
  pub fn classify(path: &Path) -> Self {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
      return FileKind::Unchecked;
    };

    SUFFIXES
      .iter()
      .find(|(suffix, _)| name.ends_with(suffix))
      .map_or(FileKind::Unchecked, |(_, kind)| *kind)
  }

  pub const fn is_checked(self) -> bool {
    !matches!(self, FileKind::Unchecked)
  }

  /// Whether the JNI string-extraction check applies. Java code calls the
  /// JNI from the other side, so only C/C++ files are inspected.
  pub const fn uses_jni_natives(self) -> bool {
    matches!(self, FileKind::NativeSource(NativeLanguage::Cpp))
  }
}
