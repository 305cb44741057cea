//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for prlink: four commands
//! that insert a pull request reference and one that forgets the stored
//! GitHub token.

mod creds;
mod insert;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use prlink_core::PrLinkError;
use prlink_core::output::print_error;
use tracing::debug;

pub use insert::InsertArgs;

/// Generic message for failures that are not a [`PrLinkError`].
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred (run with -vv for details)";

/// Top-level CLI command for prlink
#[derive(Parser)]
#[command(name = "prlink")]
#[command(display_name = "🔗 prlink")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Insert a Markdown reference to the current or next GitHub pull request")]
#[command(
  long_about = "prlink prints (or inserts into a file) a reference such as (#42) or\n\
        ([#42](https://github.com/owner/repo/pull/42)) for either the pull request\n\
        you are about to open or the one already open for your branch.\n\n\
        It reads the repository's .git metadata directly and asks GitHub's GraphQL API\n\
        for the numbers, so it is meant to be bound to an editor command."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    global = true,
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    global = true,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// When status lines on stderr are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Detect from the terminal
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Subcommands for prlink
#[derive(Subcommand)]
pub enum Commands {
  /// Insert the number the next pull request will get, e.g. (#42)
  #[command(long_about = "Predicts the number of the pull request you are about to open.\n\n\
            GitHub numbers discussions, issues and pull requests from a single counter,\n\
            so the next number is one past the latest of the three.")]
  #[command(alias = "nn")]
  NextNumber(InsertArgs),

  /// Insert a Markdown link to the next pull request
  #[command(long_about = "Like next-number, but renders a Markdown link:\n\
            ([#42](https://github.com/owner/repo/pull/42))")]
  #[command(alias = "nl")]
  NextLink(InsertArgs),

  /// Insert the number of the open pull request for this branch
  #[command(long_about = "Looks up the open pull requests whose head is the upstream branch of the\n\
            checked-out branch. When there are several you are asked to pick one.")]
  #[command(alias = "cn")]
  CurrentNumber(InsertArgs),

  /// Insert a Markdown link to the open pull request for this branch
  #[command(alias = "cl")]
  CurrentLink(InsertArgs),

  /// Forget the GitHub token stored in ~/.netrc
  #[command(long_about = "Removes the GitHub entry from your .netrc file.\n\n\
            The next command that needs GitHub will ask for a new token.")]
  ClearToken,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  match cli.command {
    Commands::NextNumber(args) => insert::handle_insert_command(args, insert::NEXT_NUMBER),
    Commands::NextLink(args) => insert::handle_insert_command(args, insert::NEXT_LINK),
    Commands::CurrentNumber(args) => insert::handle_insert_command(args, insert::CURRENT_NUMBER),
    Commands::CurrentLink(args) => insert::handle_insert_command(args, insert::CURRENT_LINK),
    Commands::ClearToken => creds::handle_clear_token_command(),
  }
}

/// The one-line message shown to the user for a failed command.
///
/// Known failures are shown verbatim; anything else is replaced by a
/// generic message and only logged.
pub fn user_message(err: &anyhow::Error) -> String {
  match err.downcast_ref::<PrLinkError>() {
    Some(known) => known.to_string(),
    None => {
      debug!("Unexpected error: {err:?}");
      UNEXPECTED_ERROR_MESSAGE.to_string()
    }
  }
}

/// Print a failed command to stderr.
pub fn report_error(err: &anyhow::Error) {
  print_error(&user_message(err));
}
