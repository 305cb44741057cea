//! # Insert Commands
//!
//! `next-number`, `next-link`, `current-number` and `current-link` share the
//! same arguments and differ only in [`Mode`] and [`RenderStyle`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prlink_core::consts::ENV_GITHUB_TOKEN;
use prlink_core::{
  ConfigDirs, CredentialStore, DialoguerPrompter, MemoryCredentialStore, NetrcCredentialStore, NonInteractivePrompter,
  Prompter, RenderStyle,
};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::pipeline::{Mode, Pipeline};
use crate::sink::{FileCursorSink, StdoutSink, TextSink};

pub(crate) const NEXT_NUMBER: (Mode, RenderStyle) = (Mode::Next, RenderStyle::Number);
pub(crate) const NEXT_LINK: (Mode, RenderStyle) = (Mode::Next, RenderStyle::Link);
pub(crate) const CURRENT_NUMBER: (Mode, RenderStyle) = (Mode::Current, RenderStyle::Number);
pub(crate) const CURRENT_LINK: (Mode, RenderStyle) = (Mode::Current, RenderStyle::Link);

/// Arguments shared by the insert commands
#[derive(Args, Debug, Clone, Default)]
pub struct InsertArgs {
  /// Repository root (defaults to the current directory)
  #[arg(
    long,
    value_name = "DIR",
    long_help = "The directory holding the .git metadata.\n\n\
             Only this directory is checked; parent directories are not searched."
  )]
  pub path: Option<PathBuf>,

  /// Insert into this file instead of printing to stdout
  #[arg(long, value_name = "FILE", requires = "offset")]
  pub insert_into: Option<PathBuf>,

  /// Byte offset of the cursor in --insert-into
  #[arg(long, value_name = "BYTE", requires = "insert_into")]
  pub offset: Option<usize>,

  /// Never prompt; treat any question as cancelled
  #[arg(long)]
  pub no_input: bool,
}

impl InsertArgs {
  fn sink(&self) -> Box<dyn TextSink> {
    match (&self.insert_into, self.offset) {
      (Some(path), Some(offset)) => Box::new(FileCursorSink::new(path, offset)),
      _ => Box::new(StdoutSink),
    }
  }

  fn prompter(&self) -> Box<dyn Prompter> {
    if self.no_input {
      Box::new(NonInteractivePrompter)
    } else {
      Box::new(DialoguerPrompter)
    }
  }
}

/// Pick the token store: `GITHUB_TOKEN` wins over `~/.netrc`.
pub(crate) fn credential_store(machine: &str) -> Result<Box<dyn CredentialStore>> {
  match std::env::var(ENV_GITHUB_TOKEN).ok().filter(|token| !token.trim().is_empty()) {
    Some(token) => {
      debug!("Using GitHub token from {ENV_GITHUB_TOKEN}");
      Ok(Box::new(MemoryCredentialStore::with_secret(machine, &token)))
    }
    None => Ok(Box::new(NetrcCredentialStore::for_current_user()?)),
  }
}

/// Handle one of the insert commands
pub(crate) fn handle_insert_command(args: InsertArgs, (mode, style): (Mode, RenderStyle)) -> Result<()> {
  let settings = ConfigDirs::new()?.load_settings()?;
  let store = credential_store(&settings.github.machine)?;
  let prompter = args.prompter();

  let repo_dir = match &args.path {
    Some(path) => path.clone(),
    None => std::env::current_dir().context("Failed to get current directory")?,
  };

  let pipeline = Pipeline::new(store.as_ref(), prompter.as_ref(), &settings);
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let text = rt.block_on(pipeline.run(mode, style, &repo_dir))?;

  args.sink().insert(&text)?;
  Ok(())
}
