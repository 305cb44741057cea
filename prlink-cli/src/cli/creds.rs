//! # Clear Token Command
//!
//! Removes the stored GitHub token so the next command asks for a new one.

use anyhow::Result;
use prlink_core::consts::ENV_GITHUB_TOKEN;
use prlink_core::output::{format_path, print_success, print_warning};
use prlink_core::{ConfigDirs, NetrcCredentialStore};
use prlink_gh::auth::clear_token;

/// Handle the clear-token command
pub(crate) fn handle_clear_token_command() -> Result<()> {
  let settings = ConfigDirs::new()?.load_settings()?;
  let store = NetrcCredentialStore::for_current_user()?;

  clear_token(&store, &settings.github.machine)?;
  print_success(&format!(
    "Removed the {} token from {}",
    settings.github.machine,
    format_path(&store.path().display().to_string())
  ));

  if std::env::var_os(ENV_GITHUB_TOKEN).is_some() {
    print_warning(&format!("{ENV_GITHUB_TOKEN} is still set and will keep being used"));
  }

  Ok(())
}
