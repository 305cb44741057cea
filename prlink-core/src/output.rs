//! # Output Formatting
//!
//! Styled status lines for the user. Everything here goes to stderr: stdout
//! is reserved for the rendered snippet so editors can capture it verbatim.

#![allow(clippy::print_stderr)]

use owo_colors::{OwoColorize, Stream};

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  eprintln!(
    "{} {}",
    check.if_supports_color(Stream::Stderr, |s| s.green().bold().to_string()),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |s| s.red().bold().to_string()),
    message
  );
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!(
    "{} {}",
    warning.if_supports_color(Stream::Stderr, |s| s.yellow().bold().to_string()),
    message
  );
}

/// Format a path for display
pub fn format_path(path: &str) -> String {
  path.bright_green().to_string()
}
