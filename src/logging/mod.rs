//! # Logging Module
//!
//! This module provides logging utilities for licensescheck, including:
//! - Verbose logging that can be enabled/disabled
//! - Informational logging with color support that quiet mode silences
//! - Installation of the `tracing` subscriber for debug diagnostics
//!
//! Verbose logs and tracing output go to stderr, informational lines go to
//! stdout next to the findings so that CI logs read in order.
//!
//! ## Example
//!
//! ```rust
//! use licensescheck::logging::{ColorMode, set_verbose};
//! use licensescheck::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Scanning directory: {}", "src");
//! info_log!("Fix: Removing trailing whitespace.");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs an informational message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an informational line, yellow when stdout supports color.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
