//! # GitHub HTTP Client
//!
//! HTTP client for the GitHub GraphQL endpoint. Every failure, whether
//! transport, HTTP status, body decoding or a response without `data`, is
//! reported as [`PrLinkError::QueryFailed`] with a readable message.

use prlink_core::{PrLinkError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::consts::{JSON_CONTENT_TYPE, USER_AGENT as USER_AGENT_VALUE};
use crate::models::{GitHubAuth, GraphQlRequest, GraphQlResponse};

/// Represents a GitHub GraphQL API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) endpoint: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client for `endpoint`
  pub fn new(auth: GitHubAuth, endpoint: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      endpoint: endpoint.into(),
      auth,
    }
  }

  /// The GraphQL endpoint this client talks to
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// POST one GraphQL query and decode its `data`.
  pub(crate) async fn graphql<T: DeserializeOwned>(
    &self,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
  ) -> Result<T> {
    debug!(operation, endpoint = %self.endpoint, "Sending GraphQL query");
    trace!(%variables, "GraphQL variables");

    let response = self
      .client
      .post(&self.endpoint)
      .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
      .header(ACCEPT, JSON_CONTENT_TYPE)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .header(AUTHORIZATION, format!("bearer {}", self.auth.token))
      .json(&GraphQlRequest { query, variables })
      .send()
      .await
      .map_err(|e| PrLinkError::QueryFailed(format!("failed to connect to GitHub: {e}")))?;

    let status = response.status();
    debug!(operation, %status, "Received GraphQL response");

    match status {
      s if s.is_success() => {}
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        return Err(PrLinkError::QueryFailed(
          "authentication failed, please check your GitHub token".to_string(),
        ));
      }
      _ => {
        return Err(PrLinkError::QueryFailed(format!("unexpected response: HTTP {status}")));
      }
    }

    let body = response
      .text()
      .await
      .map_err(|e| PrLinkError::QueryFailed(format!("failed to read response body: {e}")))?;

    let envelope: GraphQlResponse<T> = serde_json::from_str(&body)
      .map_err(|e| PrLinkError::QueryFailed(format!("failed to parse response body: {e}")))?;

    match envelope.data {
      Some(data) => {
        if !envelope.errors.is_empty() {
          debug!(operation, errors = envelope.errors.len(), "GraphQL response carried errors alongside data");
        }
        Ok(data)
      }
      None => {
        let messages: Vec<&str> = envelope
          .errors
          .iter()
          .map(|e| e.message.as_str())
          .filter(|m| !m.is_empty())
          .collect();
        let message = if messages.is_empty() {
          "response contained no data".to_string()
        } else {
          messages.join("; ")
        };
        Err(PrLinkError::QueryFailed(message))
      }
    }
  }
}

/// Create a GitHub client from a token
pub fn create_github_client(token: &str, endpoint: &str) -> GitHubClient {
  let auth = GitHubAuth {
    token: token.to_string(),
  };

  GitHubClient::new(auth, endpoint)
}
