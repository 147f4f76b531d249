//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! Arguments are parsed with clap; unknown `--` options ahead of the
//! repository separator are reported and dropped before clap sees them so
//! that a stray flag never aborts a CI run.

mod check;

use std::ffi::OsString;
use std::path::PathBuf;

pub use check::run_check;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser};
use licensescheck::logging::ColorMode;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check src/, tests/ and examples/ of the repository in the current directory
  licensescheck

  # Expand tabs and strip trailing whitespace in place
  licensescheck --fixws

  # Also insert or repair license headers, showing every change
  licensescheck --fixall --show-diff

  # Additionally check sibling repositories against their own licenses
  licensescheck -- pro enterprise
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Fix tabs and trailing whitespace (never touches license headers)
  #[arg(long, overrides_with = "fixall")]
  pub fixws: bool,

  /// Fix tabs, trailing whitespace and license headers
  #[arg(long, overrides_with = "fixws")]
  pub fixall: bool,

  /// Repository root containing src/, tests/, examples/ and
  /// tools/approved_licenses/ (default: current directory)
  #[arg(long, value_name = "DIR")]
  pub root: Option<PathBuf>,

  /// Print a diff of every applied fix to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of every applied fix to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress informational output; findings and verdicts are still printed
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Additional repositories, resolved as siblings of the root, checked
  /// against their own licenses without fixing
  #[arg(last = true, value_name = "REPO")]
  pub repos: Vec<String>,

  /// Options that were not recognized and have been dropped
  #[arg(skip)]
  pub ignored_options: Vec<String>,
}

impl Cli {
  /// Parse the process arguments, dropping unrecognized `--` options.
  pub fn parse_args() -> Self {
    Self::parse_from_args(std::env::args_os())
  }

  /// Parse the given arguments (program name first), dropping unrecognized
  /// `--` options that appear before the `--` separator.
  pub fn parse_from_args<I, T>(args: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
  {
    let (kept, ignored_options) = split_unknown_options(args.into_iter().map(Into::into), &known_long_options());
    let mut cli = Self::parse_from(kept);
    cli.ignored_options = ignored_options;
    cli
  }
}

/// A long option and whether it accepts a value (and thus `--name=value`).
struct LongOption {
  name: String,
  takes_value: bool,
}

impl LongOption {
  /// Whether `token` (without the leading `--`) names this option.
  fn matches(&self, token: &str) -> bool {
    match token.split_once('=') {
      Some((name, _)) => self.takes_value && self.name == name,
      None => self.name == token,
    }
  }
}

fn known_long_options() -> Vec<LongOption> {
  let command = Cli::command();
  command
    .get_arguments()
    .filter_map(|arg| {
      arg.get_long().map(|name| LongOption {
        name: name.to_string(),
        takes_value: arg.get_action().takes_values(),
      })
    })
    .chain(["help", "version"].map(|name| LongOption {
      name: name.to_string(),
      takes_value: false,
    }))
    .collect()
}

/// Separates `--name` tokens that name no known option from the rest.
///
/// A flag is known only by its exact token; `--name=value` is known only for
/// options that take a value. Everything after a standalone `--` is kept
/// untouched.
fn split_unknown_options<I>(args: I, known: &[LongOption]) -> (Vec<OsString>, Vec<String>)
where
  I: IntoIterator<Item = OsString>,
{
  let mut kept = Vec::new();
  let mut ignored = Vec::new();
  let mut parsing_options = true;

  for arg in args {
    if parsing_options && let Some(text) = arg.to_str() {
      if text == "--" {
        parsing_options = false;
      } else if let Some(token) = text.strip_prefix("--")
        && !known.iter().any(|option| option.matches(token))
      {
        ignored.push(text.to_string());
        continue;
      }
    }
    kept.push(arg);
  }

  (kept, ignored)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str]) -> Cli {
    Cli::parse_from_args(std::iter::once("licensescheck").chain(args.iter().copied()))
  }

  #[test]
  fn test_default_is_check_only() {
    let cli = parse(&[]);
    assert!(!cli.fixws);
    assert!(!cli.fixall);
    assert!(cli.repos.is_empty());
    assert!(cli.ignored_options.is_empty());
  }

  #[test]
  fn test_fix_flags() {
    assert!(parse(&["--fixws"]).fixws);
    assert!(parse(&["--fixall"]).fixall);
  }

  #[test]
  fn test_last_fix_flag_wins() {
    let cli = parse(&["--fixall", "--fixws"]);
    assert!(cli.fixws);
    assert!(!cli.fixall);

    let cli = parse(&["--fixws", "--fixall"]);
    assert!(!cli.fixws);
    assert!(cli.fixall);
  }

  #[test]
  fn test_value_on_flag_is_ignored() {
    let cli = parse(&["--fixws=yes", "--show-diff=1", "--fixall"]);
    assert!(cli.fixall);
    assert!(!cli.fixws);
    assert!(!cli.show_diff);
    assert_eq!(cli.ignored_options, vec!["--fixws=yes", "--show-diff=1"]);
  }

  #[test]
  fn test_unknown_option_is_ignored() {
    let cli = parse(&["--fixeverything", "--fixws"]);
    assert!(cli.fixws);
    assert_eq!(cli.ignored_options, vec!["--fixeverything".to_string()]);
  }

  #[test]
  fn test_repos_after_separator() {
    let cli = parse(&["--fixall", "--", "pro", "${voltpro}", "--fixws"]);
    assert!(cli.fixall);
    assert!(!cli.fixws);
    assert_eq!(cli.repos, vec!["pro", "${voltpro}", "--fixws"]);
    assert!(cli.ignored_options.is_empty());
  }

  #[test]
  fn test_known_option_with_value() {
    let cli = parse(&["--root=/tmp", "--colors=never"]);
    assert_eq!(cli.root, Some(PathBuf::from("/tmp")));
    assert_eq!(cli.colors, ColorMode::Never);
  }

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }
}
