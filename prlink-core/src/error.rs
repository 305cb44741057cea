//! # Errors
//!
//! Every way a single prlink invocation can fail. All variants are terminal
//! for the invocation: nothing is retried and no partial text is inserted.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the prlink libraries.
pub type Result<T, E = PrLinkError> = std::result::Result<T, E>;

/// Errors produced while resolving and rendering a pull request reference.
#[derive(Debug, Error)]
pub enum PrLinkError {
  /// No `.git` directory directly under the given path.
  #[error("{} is not a git repository (no .git directory found there)", .0.display())]
  NotARepository(PathBuf),

  /// A metadata file could not be read.
  #[error("Could not read {}: {source}", path.display())]
  FileAccess {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The git config file is not valid INI-like syntax.
  #[error("Could not parse git config (line {line}): {message}")]
  ParseError { line: usize, message: String },

  /// A remote URL is not of the `host:owner/name[.git]` form.
  #[error("Could not parse remote URL '{0}'")]
  MalformedRemoteUrl(String),

  /// The repository has no `remote` sections at all.
  #[error("No remotes are configured for this repository")]
  NoRemotes,

  /// A remote section exists but has no `url` field.
  #[error("No remote URL found for {0}")]
  MissingRemoteUrl(String),

  /// HEAD points at a ref outside `refs/heads/`.
  #[error("Unsupported ref '{0}': only branches under refs/heads/ are supported")]
  UnsupportedRefFormat(String),

  /// HEAD is a bare commit, so there is no branch to look up.
  #[error("HEAD is detached at {0}; check out a branch to find its pull request")]
  DetachedHead(String),

  /// The branch has no `merge` entry in its config section.
  #[error("No upstream branch is configured for '{0}'")]
  NoUpstreamConfigured(String),

  /// No token was available and none was provided when asked.
  #[error("A GitHub token is required but none was provided")]
  MissingCredential,

  /// Reading or writing the credential store failed.
  #[error("Credential store error: {0}")]
  CredentialStore(String),

  /// Settings file could not be read or is invalid.
  #[error("Invalid settings: {0}")]
  Settings(String),

  /// The remote API query failed for any reason.
  #[error("GitHub query failed: {0}")]
  QueryFailed(String),

  /// No open pull request is associated with the branch.
  #[error("No open pull request found for '{0}'")]
  NoMatchingPull(String),

  /// The user dismissed a selection or input prompt.
  #[error("Selection cancelled")]
  SelectionCancelled,

  /// A render style name that is neither `number` nor `link`.
  #[error("Unknown render style '{0}' (expected 'number' or 'link')")]
  UnknownRenderStyle(String),

  /// The rendered text could not be written to its destination.
  #[error("Could not write to {target}: {source}")]
  SinkWrite {
    target: String,
    #[source]
    source: io::Error,
  },

  /// The insertion cursor does not point inside the target text.
  #[error("Invalid cursor: {0}")]
  InvalidCursor(String),
}

impl PrLinkError {
  /// Build a [`PrLinkError::FileAccess`] for `path`.
  pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::FileAccess {
      path: path.into(),
      source,
    }
  }
}
