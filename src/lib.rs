//! # licensescheck
//!
//! A repository hygiene gate. It walks the `src`, `tests` and `examples`
//! trees of a repository and verifies that every Java, C++ and Python file
//! starts with one of the approved license headers stored under
//! `tools/approved_licenses`. It also flags tabs, trailing whitespace, calls
//! to `sprintf` and JNI string-extraction calls.
//!
//! Tabs and trailing whitespace can be fixed in place (`--fixws`); license
//! headers are only repaired at the stronger level (`--fixall`). Before a
//! file is first rewritten its original content is saved as `<file>.lcbak`.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use licensescheck::config::{CheckConfig, FixLevel};
//! use licensescheck::diff::DiffManager;
//! use licensescheck::licenses::LicenseCatalog;
//! use licensescheck::processor::Processor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = CheckConfig::new(Path::new("."), FixLevel::None, DiffManager::default())?;
//!     let catalog = LicenseCatalog::load(&config.root)?;
//!
//!     let tally = Processor::new(&config).check_primary(&catalog)?;
//!     if tally.found > 0 {
//!         println!("{} findings", tally.found);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Tree walking, per-file checks and fixes
//! * [`checks`] - The individual text predicates
//! * [`licenses`] - Approved license loading
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`checks`]: crate::checks
//! [`licenses`]: crate::licenses
//! [`logging`]: crate::logging

pub mod checks;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod file_kind;
pub mod licenses;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
