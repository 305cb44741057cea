//! HEAD pointer resolution.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PrLinkError, Result};
use crate::git::locator::metadata_dir;

/// Prefix marking a symbolic HEAD.
const SYMBOLIC_PREFIX: &str = "ref: ";

/// Namespace holding local branches.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// What `.git/HEAD` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadPointer {
  /// HEAD names a ref, e.g. `refs/heads/main`.
  SymbolicRef(String),
  /// HEAD holds a bare commit id.
  DetachedCommit(String),
}

impl HeadPointer {
  /// Classify the contents of a HEAD file.
  pub fn parse(content: &str) -> Self {
    match content.strip_prefix(SYMBOLIC_PREFIX) {
      Some(reference) => HeadPointer::SymbolicRef(reference.trim().to_string()),
      None => HeadPointer::DetachedCommit(content.trim().to_string()),
    }
  }

  /// Short branch name when HEAD is on a local branch.
  ///
  /// A detached HEAD yields [`PrLinkError::DetachedHead`]; a symbolic ref
  /// outside `refs/heads/` yields [`PrLinkError::UnsupportedRefFormat`].
  pub fn branch_name(&self) -> Result<&str> {
    match self {
      HeadPointer::SymbolicRef(reference) => strip_branch_prefix(reference),
      HeadPointer::DetachedCommit(commit) => Err(PrLinkError::DetachedHead(commit.clone())),
    }
  }
}

/// Read and classify `<repo_dir>/.git/HEAD`.
pub fn parse_head<P: AsRef<Path>>(repo_dir: P) -> Result<HeadPointer> {
  let head_path = metadata_dir(repo_dir)?.join("HEAD");
  let content = fs::read_to_string(&head_path).map_err(|e| PrLinkError::file_access(&head_path, e))?;
  let head = HeadPointer::parse(&content);
  debug!(?head, "Resolved HEAD");
  Ok(head)
}

/// Strip the required `refs/heads/` prefix from a ref name.
pub fn strip_branch_prefix(reference: &str) -> Result<&str> {
  match reference.strip_prefix(BRANCH_REF_PREFIX) {
    Some(branch) if !branch.is_empty() => Ok(branch),
    _ => Err(PrLinkError::UnsupportedRefFormat(reference.to_string())),
  }
}

#[cfg(test)]
mod tests {
  use prlink_test_utils::GitRepoTestGuard;

  use super::*;

  #[test]
  fn test_parse_symbolic_ref() {
    assert_eq!(
      HeadPointer::parse("ref: refs/heads/main\n"),
      HeadPointer::SymbolicRef("refs/heads/main".to_string())
    );
  }

  #[test]
  fn test_parse_detached_commit() {
    let commit = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    assert_eq!(
      HeadPointer::parse(&format!("{commit}\n")),
      HeadPointer::DetachedCommit(commit.to_string())
    );
  }

  #[test]
  fn test_strip_branch_prefix() {
    assert_eq!(strip_branch_prefix("refs/heads/main").unwrap(), "main");
    assert_eq!(strip_branch_prefix("refs/heads/feature/login").unwrap(), "feature/login");
  }

  #[test]
  fn test_strip_branch_prefix_rejects_other_namespaces() {
    for reference in ["refs/tags/v1", "refs/remotes/origin/main", "main", "refs/heads/"] {
      assert!(
        matches!(strip_branch_prefix(reference), Err(PrLinkError::UnsupportedRefFormat(r)) if r == reference),
        "{reference}"
      );
    }
  }

  #[test]
  fn test_branch_name_on_detached_head() {
    let head = HeadPointer::DetachedCommit("abc123".to_string());
    assert!(matches!(head.branch_name(), Err(PrLinkError::DetachedHead(c)) if c == "abc123"));
  }

  #[test]
  fn test_parse_head_from_repository() {
    let git_repo = GitRepoTestGuard::new();
    git_repo.set_head("ref: refs/heads/feature\n").unwrap();

    let head = parse_head(git_repo.path()).unwrap();
    assert_eq!(head.branch_name().unwrap(), "feature");
  }

  #[test]
  fn test_parse_head_missing_file() {
    let git_repo = GitRepoTestGuard::new();
    std::fs::remove_file(git_repo.path().join(".git").join("HEAD")).unwrap();

    assert!(matches!(parse_head(git_repo.path()), Err(PrLinkError::FileAccess { .. })));
  }
}
