//! # GitHub API Endpoints
//!
//! The GraphQL queries issued by prlink, one module per query.

pub mod numbers;
pub mod pulls;
