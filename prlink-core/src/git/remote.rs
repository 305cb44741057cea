//! Remote URL parsing.
//!
//! Only the SSH-style `host:owner/name[.git]` form is understood. HTTPS
//! remotes such as `https://github.com/owner/name` fail to parse.

use crate::error::{PrLinkError, Result};

/// Owner and repository name of a GitHub remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
  pub owner: String,
  pub name: String,
}

impl RemoteIdentity {
  /// `owner/name`
  pub fn slug(&self) -> String {
    format!("{}/{}", self.owner, self.name)
  }
}

/// Parse `host:owner/name[.git]` into a [`RemoteIdentity`].
pub fn parse_remote_url(url: &str) -> Result<RemoteIdentity> {
  let malformed = || PrLinkError::MalformedRemoteUrl(url.to_string());

  let (_, path) = url.split_once(':').ok_or_else(malformed)?;
  let mut tokens = path.split('/');
  let owner = tokens.next().unwrap_or_default();
  let raw_name = tokens.next().unwrap_or_default();
  let name = raw_name.strip_suffix(".git").unwrap_or(raw_name);

  if owner.is_empty() || name.is_empty() {
    return Err(malformed());
  }

  Ok(RemoteIdentity {
    owner: owner.to_string(),
    name: name.to_string(),
  })
}
