//! # Latest Numbers Query
//!
//! Fetches the most recently created discussion, issue and pull request of a
//! repository in a single round trip.

use prlink_core::{LatestNumbers, PrLinkError, Result};
use serde_json::json;
use tracing::info;

use crate::client::GitHubClient;
use crate::models::LatestNumbersData;

pub(crate) const LATEST_NUMBERS_QUERY: &str = r#"query LatestNumbers($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    discussions(orderBy: {field: CREATED_AT, direction: DESC}, first: 1) {
      nodes {
        number
      }
    }
    issues(orderBy: {field: CREATED_AT, direction: DESC}, first: 1) {
      nodes {
        number
      }
    }
    pullRequests(orderBy: {field: CREATED_AT, direction: DESC}, first: 1) {
      nodes {
        number
      }
    }
  }
}"#;

impl GitHubClient {
  /// Latest discussion, issue and pull request numbers of `owner/name`.
  pub async fn fetch_latest_numbers(&self, owner: &str, name: &str) -> Result<LatestNumbers> {
    let data: LatestNumbersData = self
      .graphql(
        "LatestNumbers",
        LATEST_NUMBERS_QUERY,
        json!({ "owner": owner, "name": name }),
      )
      .await?;

    let repository = data
      .repository
      .ok_or_else(|| PrLinkError::QueryFailed(format!("repository {owner}/{name} was not found")))?;

    let latest = repository.latest();
    info!(?latest, "Fetched latest repository numbers");
    Ok(latest)
  }
}
