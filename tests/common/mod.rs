#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use licensescheck::licenses::{
  EXTERNAL_NATIVE_LICENSE, EXTERNAL_SCRIPT_LICENSE, LICENSE_DIR, SOURCE_NATIVE_LICENSES, SOURCE_SCRIPT_LICENSES,
  TEST_NATIVE_LICENSES, TEST_SCRIPT_LICENSES,
};
use tempfile::{TempDir, tempdir};

/// Default GPL header for native files under `src`.
pub const SRC_LICENSE: &str = "/* This file is part of VoltDB.
 * Copyright (C) 2008-2024 VoltDB Inc.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation.
 */
";

/// An older GPL header that is still accepted under `src`.
pub const SRC_LEGACY_LICENSE: &str = "/* This file is part of VoltDB.
 * Copyright (C) 2008-2024 VoltDB Inc.
 *
 * This file contains original code and/or modifications of original code.
 * Any modifications made by VoltDB Inc. are licensed under the following
 * terms and conditions:
 */
";

/// Python header for `src`.
pub const SRC_PY_LICENSE: &str = "# This file is part of VoltDB.
# Copyright (C) 2008-2024 VoltDB Inc.
#
# This program is free software: you can redistribute it and/or modify
# it under the terms of the GNU Affero General Public License.
";

/// Default MIT header for native files under `tests` and `examples`.
pub const TEST_LICENSE: &str = "/* This file is part of VoltDB.
 * Copyright (C) 2008-2024 VoltDB Inc.
 *
 * Permission is hereby granted, free of charge, to any person obtaining
 * a copy of this software and associated documentation files.
 */
";

/// Python header for `tests` and `examples`.
pub const TEST_PY_LICENSE: &str = "# This file is part of VoltDB.
# Copyright (C) 2008-2024 VoltDB Inc.
#
# Permission is hereby granted, free of charge, to any person obtaining
# a copy of this software and associated documentation files.
";

/// A scratch checkout laid out like the repository the tool guards.
///
/// The repository lives in `<tempdir>/voltdb` so that sibling repositories
/// can be created next to it.
pub struct TestRepo {
  pub dir: TempDir,
  pub root: PathBuf,
}

impl TestRepo {
  pub fn new() -> Result<Self> {
    let dir = tempdir()?;
    let root = dir.path().join("voltdb");
    for tree in ["src", "tests", "examples"] {
      fs::create_dir_all(root.join(tree))?;
    }

    let licenses = root.join(LICENSE_DIR);
    fs::create_dir_all(&licenses)?;
    write_group(&licenses, SOURCE_NATIVE_LICENSES, SRC_LEGACY_LICENSE, SRC_LICENSE)?;
    write_group(&licenses, SOURCE_SCRIPT_LICENSES, SRC_PY_LICENSE, SRC_PY_LICENSE)?;
    write_group(&licenses, TEST_NATIVE_LICENSES, "/* retired MIT header */\n", TEST_LICENSE)?;
    write_group(&licenses, TEST_SCRIPT_LICENSES, TEST_PY_LICENSE, TEST_PY_LICENSE)?;

    Ok(Self { dir, root })
  }

  /// Writes a file relative to the repository root, creating parent directories.
  pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
    write_file(&self.root, relative, content)
  }

  pub fn read(&self, relative: &str) -> Result<String> {
    let path = self.root.join(relative);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.root.join(relative)
  }

  /// Creates a sibling repository with its own single license pair.
  pub fn add_external_repo(&self, name: &str, native: &str, script: &str) -> Result<PathBuf> {
    let repo = self.dir.path().join(name);
    for tree in ["src", "tests"] {
      fs::create_dir_all(repo.join(tree))?;
    }
    let licenses = repo.join(LICENSE_DIR);
    fs::create_dir_all(&licenses)?;
    fs::write(licenses.join(EXTERNAL_NATIVE_LICENSE), native)?;
    fs::write(licenses.join(EXTERNAL_SCRIPT_LICENSE), script)?;
    Ok(repo)
  }
}

pub fn write_file(base: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = base.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// Writes every file of a group; the last one (the default) gets `default`,
/// the others `other`.
fn write_group(dir: &Path, names: &[&str], other: &str, default: &str) -> Result<()> {
  for (index, name) in names.iter().enumerate() {
    let content = if index + 1 == names.len() { default } else { other };
    fs::write(dir.join(name), content)?;
  }
  Ok(())
}
