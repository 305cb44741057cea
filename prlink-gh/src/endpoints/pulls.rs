//! # Associated Pull Requests Query
//!
//! Lists the open pull requests whose head is a given branch ref.

use prlink_core::{PrLinkError, PullCandidate, Result};
use serde_json::json;
use tracing::{debug, info};

use crate::client::GitHubClient;
use crate::consts::ASSOCIATED_PULLS_LIMIT;
use crate::models::AssociatedPullsData;

pub(crate) const ASSOCIATED_PULLS_QUERY: &str = r#"query AssociatedPulls($owner: String!, $name: String!, $branch: String!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    ref(qualifiedName: $branch) {
      associatedPullRequests(first: $first, states: OPEN) {
        nodes {
          number
          state
          title
          url
        }
      }
    }
  }
}"#;

impl GitHubClient {
  /// Open pull requests associated with `branch` (a ref such as
  /// `refs/heads/feature`), in the order GitHub returns them.
  pub async fn fetch_associated_pulls(&self, owner: &str, name: &str, branch: &str) -> Result<Vec<PullCandidate>> {
    let data: AssociatedPullsData = self
      .graphql(
        "AssociatedPulls",
        ASSOCIATED_PULLS_QUERY,
        json!({
          "owner": owner,
          "name": name,
          "branch": branch,
          "first": ASSOCIATED_PULLS_LIMIT,
        }),
      )
      .await?;

    let repository = data
      .repository
      .ok_or_else(|| PrLinkError::QueryFailed(format!("repository {owner}/{name} was not found")))?;

    let Some(git_ref) = repository.git_ref else {
      debug!(branch, "Branch does not exist on GitHub");
      return Ok(Vec::new());
    };

    let pulls = git_ref.associated_pull_requests.nodes;
    info!(branch, count = pulls.len(), "Fetched associated pull requests");
    Ok(pulls)
  }
}
