//! Constants for the prlink-gh client

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("prlink/", env!("CARGO_PKG_VERSION"));

/// Accept and Content-Type header value for GraphQL requests
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Maximum number of associated pull requests requested per branch
pub const ASSOCIATED_PULLS_LIMIT: u32 = 10;
