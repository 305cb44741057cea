//! # prlink Core Library
//!
//! The resolution pipeline behind prlink: locating a repository's git
//! metadata, resolving the GitHub owner/name and upstream branch, choosing a
//! pull request number and rendering the Markdown snippet. Collaborators that
//! touch the outside world (credentials, prompts) are traits so the pipeline
//! stays testable.

pub mod config;
pub mod consts;
pub mod creds;
pub mod error;
pub mod git;
pub mod output;
pub mod prompts;
pub mod pulls;
pub mod select;
pub mod template;

// Re-export main types
pub use config::{ConfigDirs, Settings};
pub use creds::{CredentialStore, MemoryCredentialStore, NetrcCredentialStore};
pub use error::{PrLinkError, Result};
pub use git::{ConfigMap, HeadPointer, RemoteIdentity};
pub use prompts::{DialoguerPrompter, NonInteractivePrompter, Prompter};
pub use pulls::{LatestNumbers, PullCandidate, PullState};
pub use select::{choose_pull, next_number};
pub use template::{RenderStyle, RenderTarget, render};
