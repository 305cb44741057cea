//! # GitHub API Client
//!
//! Provides the two read-only GitHub GraphQL queries prlink needs: the latest
//! discussion/issue/pull request numbers of a repository, and the open pull
//! requests associated with a branch.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use auth::{clear_token, resolve_token};
pub use client::{GitHubClient, create_github_client};
// Re-export models
pub use models::GitHubAuth;
