//! Authentication helpers for the GitHub client.
//!
//! Looks the token up in a [`CredentialStore`]; when it is missing, the user
//! is asked for one through the [`Prompter`] and the answer is stored for the
//! next invocation.

use prlink_core::{CredentialStore, PrLinkError, Prompter, Result};
use tracing::{debug, info};

/// Prompt shown when no token is stored.
pub const TOKEN_PROMPT: &str = "GitHub Personal Access Token";

/// Return the stored token for `machine`, asking for and storing one if absent.
pub fn resolve_token(store: &dyn CredentialStore, prompter: &dyn Prompter, machine: &str) -> Result<String> {
  if let Some(token) = store.get(machine)?.filter(|token| !token.trim().is_empty()) {
    debug!(machine, "Using stored GitHub token");
    return Ok(token);
  }

  let token = prompter
    .input_secret(TOKEN_PROMPT)?
    .ok_or(PrLinkError::MissingCredential)?;

  store.set(machine, &token)?;
  info!(machine, "Stored new GitHub token");
  Ok(token)
}

/// Forget the stored token for `machine`.
pub fn clear_token(store: &dyn CredentialStore, machine: &str) -> Result<()> {
  store.delete(machine)?;
  info!(machine, "Cleared stored GitHub token");
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use prlink_core::MemoryCredentialStore;

  use super::*;

  struct TokenPrompter {
    answer: Option<&'static str>,
    asked: Cell<usize>,
  }

  impl TokenPrompter {
    fn new(answer: Option<&'static str>) -> Self {
      Self {
        answer,
        asked: Cell::new(0),
      }
    }
  }

  impl Prompter for TokenPrompter {
    fn select(&self, _prompt: &str, _items: &[String]) -> Result<Option<usize>> {
      Ok(None)
    }

    fn input_secret(&self, prompt: &str) -> Result<Option<String>> {
      assert_eq!(prompt, TOKEN_PROMPT);
      self.asked.set(self.asked.get() + 1);
      Ok(self.answer.map(str::to_string))
    }
  }

  #[test]
  fn test_stored_token_is_used_without_prompt() {
    let store = MemoryCredentialStore::with_secret("github.com", "gh-token");
    let prompter = TokenPrompter::new(Some("other"));

    assert_eq!(resolve_token(&store, &prompter, "github.com").unwrap(), "gh-token");
    assert_eq!(prompter.asked.get(), 0);
  }

  #[test]
  fn test_missing_token_is_prompted_and_stored() {
    let store = MemoryCredentialStore::new();
    let prompter = TokenPrompter::new(Some("fresh-token"));

    assert_eq!(resolve_token(&store, &prompter, "github.com").unwrap(), "fresh-token");
    assert_eq!(prompter.asked.get(), 1);
    assert_eq!(store.get("github.com").unwrap().as_deref(), Some("fresh-token"));
  }

  #[test]
  fn test_declined_prompt_is_missing_credential() {
    let store = MemoryCredentialStore::new();
    let prompter = TokenPrompter::new(None);

    let error = resolve_token(&store, &prompter, "github.com").unwrap_err();
    assert!(matches!(error, PrLinkError::MissingCredential));
    assert_eq!(store.get("github.com").unwrap(), None);
  }

  #[test]
  fn test_clear_token() {
    let store = MemoryCredentialStore::with_secret("github.com", "gh-token");

    clear_token(&store, "github.com").unwrap();
    assert_eq!(store.get("github.com").unwrap(), None);
  }
}
