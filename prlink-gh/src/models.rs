//! Wire types for the GitHub GraphQL API.

use prlink_core::{LatestNumbers, PullCandidate};
use serde::{Deserialize, Serialize};

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

impl std::fmt::Debug for GitHubAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GitHubAuth").field("token", &"<redacted>").finish()
  }
}

/// Request body: `{query, variables}`.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
  pub query: &'a str,
  pub variables: serde_json::Value,
}

/// Response envelope: `{data}` and/or `{errors}`.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphQlError>,
}

/// One entry of the `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
  #[serde(default)]
  pub message: String,
}

/// `data` of the latest-numbers query.
#[derive(Debug, Deserialize)]
pub struct LatestNumbersData {
  pub repository: Option<RepositoryNumbers>,
}

/// The three "most recent item" connections of a repository.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNumbers {
  pub discussions: Option<NumberConnection>,
  pub issues: Option<NumberConnection>,
  pub pull_requests: Option<NumberConnection>,
}

impl RepositoryNumbers {
  /// Collapse the connections into [`LatestNumbers`].
  pub fn latest(&self) -> LatestNumbers {
    LatestNumbers {
      discussion_number: first_number(self.discussions.as_ref()),
      issue_number: first_number(self.issues.as_ref()),
      pull_request_number: first_number(self.pull_requests.as_ref()),
    }
  }
}

fn first_number(connection: Option<&NumberConnection>) -> Option<u64> {
  connection?.nodes.first()?.as_ref()?.number
}

/// A connection whose nodes only carry a number.
#[derive(Debug, Deserialize)]
pub struct NumberConnection {
  #[serde(default)]
  pub nodes: Vec<Option<NumberNode>>,
}

#[derive(Debug, Deserialize)]
pub struct NumberNode {
  pub number: Option<u64>,
}

/// `data` of the associated-pulls query.
#[derive(Debug, Deserialize)]
pub struct AssociatedPullsData {
  pub repository: Option<RepositoryRef>,
}

/// `repository.ref`, null when the branch does not exist on GitHub.
#[derive(Debug, Deserialize)]
pub struct RepositoryRef {
  #[serde(rename = "ref")]
  pub git_ref: Option<RefPulls>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefPulls {
  pub associated_pull_requests: PullConnection,
}

#[derive(Debug, Deserialize)]
pub struct PullConnection {
  #[serde(default)]
  pub nodes: Vec<PullCandidate>,
}
