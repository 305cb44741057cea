//! # Git Metadata
//!
//! Read-only access to the handful of `.git` fields needed to locate a
//! pull request: remote URLs, branch merge refs and HEAD.

pub mod config;
pub mod head;
pub mod locator;
pub mod remote;

pub use config::{ConfigMap, ConfigSection, list_remotes, parse_config, remote_name, resolve_branch_merge};
pub use head::{HeadPointer, parse_head, strip_branch_prefix};
pub use locator::{is_repository, metadata_dir};
pub use remote::{RemoteIdentity, parse_remote_url};
