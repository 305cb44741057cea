//! # Prompts Module
//!
//! The selection and input service used when a command needs the user to
//! disambiguate (several remotes, several pull requests) or to supply a token.
//! Interactive prompts use a custom dialoguer theme.

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Password, Select};
use tracing::debug;

use crate::error::Result;

/// Asks the user to pick from a list or type a secret.
///
/// `Ok(None)` means the user dismissed the prompt.
pub trait Prompter {
  /// Pick one of `items`; returns its index.
  fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

  /// Ask for a secret value, such as an access token.
  fn input_secret(&self, prompt: &str) -> Result<Option<String>>;
}

/// Returns a custom dialoguer theme matching prlink's color palette.
///
/// Features:
/// - Cyan bold prompt text
/// - Green `❯` prefix on active item
/// - Green highlight on active item text
pub fn prlink_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Terminal prompts on stderr.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
  fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
    // Escape, Ctrl-C and terminal errors all count as a dismissal.
    let selection = Select::with_theme(&prlink_theme())
      .with_prompt(prompt)
      .items(items)
      .default(0)
      .interact_opt()
      .unwrap_or_else(|e| {
        debug!("Selection prompt failed: {e}");
        None
      });
    Ok(selection)
  }

  fn input_secret(&self, prompt: &str) -> Result<Option<String>> {
    let input = Password::with_theme(&prlink_theme())
      .with_prompt(prompt)
      .allow_empty_password(true)
      .interact()
      .unwrap_or_else(|e| {
        debug!("Secret prompt failed: {e}");
        String::new()
      });

    let trimmed = input.trim();
    if trimmed.is_empty() {
      Ok(None)
    } else {
      Ok(Some(trimmed.to_string()))
    }
  }
}

/// Answers every prompt with a dismissal. Used with `--no-input`.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
  fn select(&self, prompt: &str, _items: &[String]) -> Result<Option<usize>> {
    debug!(prompt, "Prompt skipped in non-interactive mode");
    Ok(None)
  }

  fn input_secret(&self, prompt: &str) -> Result<Option<String>> {
    debug!(prompt, "Secret prompt skipped in non-interactive mode");
    Ok(None)
  }
}
