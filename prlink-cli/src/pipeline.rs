//! # Resolution Pipeline
//!
//! Runs one invocation end to end: locate the repository, resolve the GitHub
//! owner/name (and, for the current pull request, the upstream branch), issue
//! a single GraphQL query, pick a number and render the snippet.
//!
//! Nothing is written anywhere until the whole pipeline succeeds; the caller
//! hands the returned text to a [`TextSink`](crate::sink::TextSink).

use std::path::Path;

use prlink_core::git::{
  list_remotes, metadata_dir, parse_config, parse_head, parse_remote_url, remote_name, resolve_branch_merge,
};
use prlink_core::{
  ConfigMap, CredentialStore, PrLinkError, Prompter, RemoteIdentity, RenderStyle, RenderTarget, Result, Settings,
  choose_pull, next_number, render,
};
use prlink_gh::{GitHubClient, create_github_client, resolve_token};
use tracing::{debug, info, instrument};

/// Which pull request the snippet refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// The pull request that will be opened next.
  Next,
  /// The open pull request for the checked-out branch.
  Current,
}

/// The pipeline plus its explicit collaborators.
pub struct Pipeline<'a> {
  store: &'a dyn CredentialStore,
  prompter: &'a dyn Prompter,
  settings: &'a Settings,
}

impl<'a> Pipeline<'a> {
  pub fn new(store: &'a dyn CredentialStore, prompter: &'a dyn Prompter, settings: &'a Settings) -> Self {
    Self {
      store,
      prompter,
      settings,
    }
  }

  /// Resolve the pull request number for `repo_dir` and render it.
  #[instrument(skip(self), level = "debug")]
  pub async fn run(&self, mode: Mode, style: RenderStyle, repo_dir: &Path) -> Result<String> {
    let git_dir = metadata_dir(repo_dir)?;
    debug!(git_dir = %git_dir.display(), "Found repository metadata");

    let config = parse_config(repo_dir)?;
    let identity = self.resolve_identity(&config)?;

    let number = match mode {
      Mode::Next => self.next_pull_number(&identity).await?,
      Mode::Current => self.current_pull_number(&config, &identity, repo_dir).await?,
    };

    let text = render(&RenderTarget::new(style, number, &identity));
    info!(%text, "Rendered pull request reference");
    Ok(text)
  }

  /// Pick a remote and parse its URL into owner/name.
  fn resolve_identity(&self, config: &ConfigMap) -> Result<RemoteIdentity> {
    let remote_key = self.select_remote(config)?;
    let name = remote_name(remote_key);
    let url = config
      .remote_url(remote_key)
      .ok_or_else(|| PrLinkError::MissingRemoteUrl(name.to_string()))?;

    let identity = parse_remote_url(url)?;
    debug!(remote = name, repository = %identity.slug(), "Resolved GitHub repository");
    Ok(identity)
  }

  fn select_remote<'c>(&self, config: &'c ConfigMap) -> Result<&'c str> {
    let remotes = list_remotes(config);
    match remotes.as_slice() {
      [] => Err(PrLinkError::NoRemotes),
      [only] => Ok(*only),
      _ => {
        let names: Vec<String> = remotes.iter().map(|key| remote_name(key).to_string()).collect();
        let index = self
          .prompter
          .select("Select a remote", &names)?
          .filter(|index| *index < remotes.len())
          .ok_or(PrLinkError::SelectionCancelled)?;
        Ok(remotes[index])
      }
    }
  }

  async fn next_pull_number(&self, identity: &RemoteIdentity) -> Result<u64> {
    let client = self.client()?;
    let latest = client.fetch_latest_numbers(&identity.owner, &identity.name).await?;
    Ok(next_number(&latest))
  }

  async fn current_pull_number(&self, config: &ConfigMap, identity: &RemoteIdentity, repo_dir: &Path) -> Result<u64> {
    let head = parse_head(repo_dir)?;
    let branch = head.branch_name()?;
    let merge_ref = resolve_branch_merge(config, branch)
      .ok_or_else(|| PrLinkError::NoUpstreamConfigured(branch.to_string()))?;
    debug!(branch, merge_ref, "Resolved upstream branch");

    let client = self.client()?;
    let candidates = client
      .fetch_associated_pulls(&identity.owner, &identity.name, merge_ref)
      .await?;
    let pull = choose_pull(candidates, branch, self.prompter)?;
    Ok(pull.number)
  }

  /// Build the API client, asking for a token if none is stored.
  fn client(&self) -> Result<GitHubClient> {
    let github = &self.settings.github;
    let token = resolve_token(self.store, self.prompter, &github.machine)?;
    Ok(create_github_client(&token, &github.graphql_url))
  }
}
