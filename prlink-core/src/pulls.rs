//! Pull request data as seen by the selection step.

use std::fmt;

use serde::Deserialize;

/// Most recent discussion, issue and pull request numbers of a repository.
///
/// A field is `None` when the repository has no item of that kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestNumbers {
  pub discussion_number: Option<u64>,
  pub issue_number: Option<u64>,
  pub pull_request_number: Option<u64>,
}

/// State of a pull request as reported by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullState {
  Open,
  Closed,
  Merged,
}

impl fmt::Display for PullState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      PullState::Open => "open",
      PullState::Closed => "closed",
      PullState::Merged => "merged",
    };
    f.write_str(label)
  }
}

/// A pull request associated with a branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullCandidate {
  pub number: u64,
  pub state: PullState,
  pub title: String,
  pub url: String,
}

impl PullCandidate {
  /// One-line label used in selection prompts.
  pub fn label(&self) -> String {
    format!("#{} {} ({})", self.number, self.title, self.state)
  }
}
