//! Core constants shared across prlink components.

/// Application name used for project directories and the User-Agent.
pub const APP_NAME: &str = "prlink";

/// Credential store key (and `.netrc` machine) holding the GitHub token.
pub const GITHUB_MACHINE: &str = "github.com";

/// Default GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Environment variable carrying a GitHub token; bypasses the credential file.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable overriding the GraphQL endpoint.
pub const ENV_GRAPHQL_URL: &str = "PRLINK_GRAPHQL_URL";

/// Environment variable overriding the configuration directory.
pub const ENV_CONFIG_DIR: &str = "PRLINK_CONFIG_DIR";
