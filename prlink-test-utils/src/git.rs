//! Git repository management for testing
//!
//! Creates real repositories with `git2` and then shapes their metadata
//! (remotes, upstream branches, HEAD) the way a user's clone would look.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::Repository;
use tempfile::TempDir;

/// A temporary git repository, removed when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository whose HEAD points at `refs/heads/main`.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let repo = Repository::init(temp_path).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "prlink Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "prlink-test@example.com")
      .expect("Failed to set user.email");

    repo
      .set_head("refs/heads/main")
      .expect("Failed to point HEAD at refs/heads/main");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the working tree
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Add a remote with the given URL.
  pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
    self
      .repo
      .remote(name, url)
      .with_context(|| format!("Failed to add remote '{name}'"))?;
    Ok(())
  }

  /// Configure `branch.<branch>.remote` and `branch.<branch>.merge`.
  pub fn set_upstream(&self, branch: &str, remote: &str, merge_ref: &str) -> Result<()> {
    let mut config = self.repo.config().context("Failed to open repository config")?;
    config.set_str(&format!("branch.{branch}.remote"), remote)?;
    config.set_str(&format!("branch.{branch}.merge"), merge_ref)?;
    Ok(())
  }

  /// Overwrite `.git/HEAD` with raw content, e.g. `ref: refs/heads/x\n` or a
  /// commit id for a detached HEAD.
  pub fn set_head(&self, content: &str) -> Result<()> {
    fs::write(self.path().join(".git").join("HEAD"), content).context("Failed to write HEAD")
  }

  /// Overwrite `.git/config` with raw content.
  pub fn write_config(&self, content: &str) -> Result<()> {
    fs::write(self.path().join(".git").join("config"), content).context("Failed to write config")
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}
